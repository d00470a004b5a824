use slate_core::center::NotificationCenter;
use slate_core::config::ShellConfig;
use slate_core::notify::{NotificationManager, NotifyChannel};
use slate_core::topbar::TopBar;

use crate::home::HomeScreen;

/// All mutable shell state except `backend`, `sdi`, and the platform
/// services (which stay as separate locals in main() for borrow-splitting).
pub struct ShellState {
    pub config: ShellConfig,
    pub manager: NotificationManager,
    pub center: NotificationCenter,
    pub topbar: TopBar,
    pub channel: NotifyChannel,
    pub home: HomeScreen,
    /// Start y of an in-flight top-edge drag (drives the top-bar toggle).
    pub drag_start: Option<i32>,
    pub frame_counter: u64,
}
