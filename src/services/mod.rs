// QrScan services
// Services wrap the collaborators the scan session depends on: camera, clock,
// link handling and settings.

pub mod camera;
pub mod clock;
pub mod link_handler;
pub mod settings_engine;
