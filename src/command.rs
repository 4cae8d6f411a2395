/// Control requests queued from normal context and carried out by the
/// refresh scheduler between row transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Rewrite the configuration register with a new 6-bit current gain
    SetCurrentGain(u8),
    /// Drive EN so the chips sink (true) or stop sinking (false) current
    SetOutputEnabled(bool),
}

/// Number of commands that can wait for the next refresh tick
pub const COMMAND_QUEUE_SIZE: usize = 4;
