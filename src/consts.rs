//! Shared defaults for the theme and media controllers.

// ── Theme ───────────────────────────────────────────────────────

/// `localStorage` key holding the stored theme mode.
pub const THEME_STORAGE_KEY: &str = "seaton-web";

/// Media query watched for the OS color-scheme preference.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

// ── Media polling and recovery ──────────────────────────────────

/// Stall poll interval in milliseconds.
pub const STALL_POLL_INTERVAL_MS: u32 = 5_000;

/// Seconds the play-head is pushed forward when recovering from a stall.
pub const STALL_NUDGE_SECS: f64 = 0.1;

/// How long the priority loading indicator may stay up, in milliseconds.
pub const LOADING_TIMEOUT_MS: u32 = 1_500;

/// Buffered fraction at which the priority loading indicator is lowered.
pub const BUFFERED_READY_FRACTION: f64 = 0.1;

/// Fraction of the poll interval that must pass between recovery attempts.
pub const RECOVERY_GAP_FRACTION: f64 = 0.9;

// ── Source selection ────────────────────────────────────────────

/// Viewport width below which the target quality is `Low`.
pub const LOW_QUALITY_MAX_WIDTH_PX: f64 = 480.0;

/// Viewport width below which the target quality is `Medium`.
pub const MEDIUM_QUALITY_MAX_WIDTH_PX: f64 = 1_080.0;

/// Battery level under which a discharging device is treated as low.
pub const LOW_BATTERY_LEVEL: f64 = 0.2;

// ── Viewport easing ─────────────────────────────────────────────

/// Container width below which the video is zoomed and dimmed.
pub const MOBILE_CONTAINER_PX: f64 = 768.0;

/// Fraction of the remaining distance covered per animation frame.
pub const EASING_BLEND: f64 = 0.1;

/// Distance under which an eased value snaps to its target.
pub const EASING_EPSILON: f64 = 0.001;

/// Opacity and scale for narrow containers.
pub const NARROW_OPACITY: f64 = 0.35;
pub const NARROW_SCALE: f64 = 1.2;

/// Opacity and scale for wide containers.
pub const WIDE_OPACITY: f64 = 0.4;
pub const WIDE_SCALE: f64 = 1.0;

/// Pose held until the first `canplay`; easing away from it is the entry transition.
pub const HIDDEN_OPACITY: f64 = 0.0;
pub const HIDDEN_SCALE: f64 = 1.1;

/// Body class raised while a priority video is loading.
pub const VIDEO_LOADING_CLASS: &str = "video-loading";
