// QrScan state managers
// Managers own the stateful parts of the app: the history log, the scan session
// and the history screen.

pub mod history_store;
pub mod history_viewer;
pub mod scan_session;
