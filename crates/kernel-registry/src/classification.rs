/// Servers whose primary tool is classified `Command` rather than `Query`
/// (§4.1, Classification rule). Kept as a flat const table, same idiom as
/// `kernel-resilience`'s pattern tables — tuning this is editing one array.
pub const COMMAND_SERVERS: &[&str] = &["reporter", "decision"];

/// Servers whose primary tool is flagged `requiresConfirmation` (§4.1).
pub const CONFIRMATION_SERVERS: &[&str] = &["decision"];
