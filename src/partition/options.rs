use serde::{Deserialize, Serialize};

/// What happens to the `rows mod W` rows that do not divide evenly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Assign them to nobody. They stay zero in the distributed output while
    /// the baseline still convolves them.
    #[default]
    Drop,
    /// Append them to the last worker's block.
    ExtendLast,
}

/// Whether workers fetch the rows bordering their block before convolving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HaloMode {
    /// Each block is convolved alone; its first and last rows stay unwritten.
    #[default]
    None,
    /// Neighbouring ranks swap one boundary row each way before convolving.
    Exchange,
}

/// Options controlling how a grid is cut into row-blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionOptions {
    pub remainder: RemainderPolicy,
    pub halo: HaloMode,
}

impl PartitionOptions {
    pub fn new(remainder: RemainderPolicy, halo: HaloMode) -> Self {
        Self { remainder, halo }
    }

    /// Remainder rows covered and halos exchanged: output matches the baseline.
    pub fn exact() -> Self {
        Self::new(RemainderPolicy::ExtendLast, HaloMode::Exchange)
    }

    pub fn with_remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }

    pub fn with_halo(mut self, halo: HaloMode) -> Self {
        self.halo = halo;
        self
    }
}
