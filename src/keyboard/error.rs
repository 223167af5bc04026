#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Couldn't install the keyboard hook: {}", .0)]
    Listen(String),

    #[error("Keyboard hook stopped unexpectedly")]
    HookExited,

    #[error("Couldn't spawn the keyboard hook thread: {}", .0)]
    Spawn(String),
}
