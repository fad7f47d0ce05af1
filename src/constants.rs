// API configuration
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const MAX_PAGE_SIZE: u32 = 100;

// Per-view page sizes
pub const EXPENSES_PAGE_SIZE: u32 = 10;
pub const EVENTS_PAGE_SIZE: u32 = 9;
pub const PRESENCES_PAGE_SIZE: u32 = 10;

// Spreadsheet day-serial offsets to 1970-01-01
pub const EXCEL_1900_EPOCH_OFFSET_DAYS: i64 = 25569;
pub const EXCEL_1904_EPOCH_OFFSET_DAYS: i64 = 24107;
pub const MAX_DAY_SERIAL: f64 = 4_000_000.0;

// Member import defaults
pub const IMPORT_MIN_CELLS: usize = 2;
pub const DEFAULT_MINISTRY: &str = "Non spécifié";
pub const DEFAULT_MEMBER_ACTIVE: bool = true;

// Presence status wire values
pub const STATUS_PRESENT: &str = "PRESENT";
pub const STATUS_ABSENT: &str = "ABSENT";
pub const STATUS_EXCUSED: &str = "MOTIVE";

// Validation limits
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_LOCATION_LENGTH: usize = 255;
pub const MAX_SEARCH_TERM_LENGTH: usize = 100;
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

// Error messages
pub const ERR_FETCH_COLLECTION: &str = "Erreur lors du chargement des données";
pub const ERR_CREATE_EXPENSE: &str = "Erreur lors de la création de la dépense";
pub const ERR_UPDATE_EXPENSE: &str = "Erreur lors de la modification de la dépense";
pub const ERR_DELETE_EXPENSE: &str = "Erreur lors de la suppression de la dépense";
pub const ERR_CREATE_EVENT: &str = "Erreur lors de la création de l'événement";
pub const ERR_CREATE_SERVICE: &str = "Erreur lors de la création du culte";
pub const ERR_IMPORT_MEMBERS: &str = "Erreur lors de l'importation des membres";
pub const ERR_IMPORT_PARSE: &str = "Le fichier n'a pas pu être lu";
