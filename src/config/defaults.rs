//! System-wide default constants.
//!
//! Centralises the magic numbers used outside the physics models.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Impact Requests
// ============================================================================

/// Asteroid diameter used when a request omits `diameter_m` (m).
pub const DEFAULT_DIAMETER_M: f64 = 50.0;

/// Entry velocity used when a request omits `velocity_km_s` (km/s).
pub const DEFAULT_VELOCITY_KM_S: f64 = 20.0;

/// Impact latitude used when a request omits `latitude` (degrees).
pub const DEFAULT_LATITUDE: f64 = 0.0;

/// Impact longitude used when a request omits `longitude` (degrees).
pub const DEFAULT_LONGITUDE: f64 = 0.0;

/// Population density used when a request omits `pop_density_per_km2`.
pub const DEFAULT_POP_DENSITY_PER_KM2: f64 = 1000.0;

// ============================================================================
// Simulation Ids
// ============================================================================

/// Prefix for stored simulation ids (`sim_48213`).
pub const SIMULATION_ID_PREFIX: &str = "sim_";

/// Inclusive lower bound of the numeric id suffix.
pub const SIMULATION_ID_MIN: u32 = 10_000;

/// Inclusive upper bound of the numeric id suffix.
pub const SIMULATION_ID_MAX: u32 = 99_999;

/// How many random ids to try before giving up on a crowded store.
pub const MAX_ID_ATTEMPTS: usize = 64;

// ============================================================================
// HTTP Server
// ============================================================================

/// Bind address when neither config nor `--addr` supply one.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

/// Maximum accepted request body (bytes). Simulation payloads are tiny.
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

// ============================================================================
// Storage
// ============================================================================

/// Default location of the JSON-array record file.
pub const DEFAULT_JSON_STORE_PATH: &str = "impacts.json";

/// Default location of the sled database directory.
pub const DEFAULT_SLED_STORE_PATH: &str = "./data/impacts.db";

// ============================================================================
// NASA NeoWs
// ============================================================================

/// Root of the NASA Near Earth Object Web Service.
pub const NASA_NEO_BASE_URL: &str = "https://api.nasa.gov/neo/rest/v1";

/// HTTP timeout for NEO feed requests (seconds).
pub const NASA_HTTP_TIMEOUT_SECS: u64 = 10;

/// Relative velocity assumed when an object has no usable close approach (km/s).
pub const NEO_FALLBACK_VELOCITY_KM_S: f64 = 20.0;

/// Environment variable holding the NASA API key.
pub const NASA_API_KEY_VAR: &str = "NASA_API_KEY";

/// File the API-key bootstrap persists into.
pub const DOTENV_PATH: &str = ".env";
