use strum::Display;

/// Result state of a check, following the monitoring-plugin exit code convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Warning,
    Critical,

    /// The check could not be performed (bad configuration, unreachable database, ...)
    Unknown,
}

impl Status {
    /// Process exit code reported to the monitoring system.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }

    /// Rank used when combining several results.
    ///
    /// `Critical` outranks `Unknown`, which outranks `Warning` and `Ok`.
    const fn rank(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Unknown => 2,
            Self::Critical => 3,
        }
    }

    /// Returns whichever of the two states is more severe.
    #[must_use]
    pub const fn worst(self, other: Self) -> Self {
        if other.rank() > self.rank() { other } else { self }
    }
}
