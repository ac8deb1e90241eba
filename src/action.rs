// Every user interaction, async result, and internal event is represented as an
// Action variant. The App event loop dispatches these to component handlers.

use std::path::PathBuf;

use crate::visualizer::VisualizerMode;

/// All events flowing through the app: user actions, player reports, and
/// internal signals. The [`App`](crate::app::App) event loop dispatches
/// each variant to the appropriate handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,

    PlayIndex(usize),
    TogglePlayPause,
    Stop,
    NextTrack,
    PrevTrack,
    PlaybackStarted {
        title: String,
    },
    PlaybackLoading,
    PlaybackFinished,
    PlaybackPosition(f64),

    AddPaths(Vec<PathBuf>),
    RemoveFromPlaylist(usize),
    ClearPlaylist,
    ToggleShuffle,
    ToggleRepeat,

    VolumeUp,
    VolumeDown,
    VolumeChanged(u8),

    SetVisualizerMode(VisualizerMode),
    CycleVisualizer,
    OpenModeSelector,
    CloseModeSelector,

    OpenAddPath,
    CloseAddPath,

    CycleTheme,

    ShowError(String),
    ClearError,
    /// Timer expiry for the error shown with this sequence number.
    ExpireError(u64),
    ShowHelp,
    HideHelp,
    Tick,
}
