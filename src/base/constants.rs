//! Domain constants

/// Extension of interface-description source files
pub const WEBIDL_EXT: &str = "webidl";

/// Extended attribute listing the properties that carry use counters
pub const INSTRUMENTED_PROPS: &str = "InstrumentedProps";

/// Extended attribute listing the globals an interface is exposed on
pub const EXPOSED: &str = "Exposed";

/// The interface whose annotation lists missing global constructors
pub const GLOBAL_INTERFACE: &str = "Window";

/// Directive prefixing every use-counter line in the conf file
pub const USE_COUNTER_DIRECTIVE: &str = "method";

/// Config file looked up next to the corpus when none is given
pub const CONFIG_FILE_NAME: &str = "idl-counters.toml";
