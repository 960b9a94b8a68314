/// The five stick animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StickKind {
    /// Sticks wave forward then back, forever.
    LinearLoading,
    /// Sticks fill from the left in proportion to a percentage.
    LinearProgress,
    /// Sticks wave around a ring; colours swap every lap.
    CircularLoading,
    /// Percentage fill grows symmetrically around the active stick of a ring.
    CircularProgress,
    /// Ring sweep that bounces back at the fill bookmark.
    CircularReversibleProgress,
}

/// How sticks are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// A horizontal row.
    Linear,
    /// Evenly spaced around a circle.
    Ring,
}

/// How the active index travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    /// Forward to the last stick, then back to the lower bound, and again.
    Bounce,
    /// Forward only; after the last stick the index wraps to 0.
    Wrap,
}

/// Which sticks a percentage hard-fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Indices `0..fill_count`.
    FromStart,
    /// Half of the fill on each side of the active stick, wrapping around the ring.
    Symmetric,
}

impl StickKind {
    /// All kinds in declaration order.
    pub const ALL: [StickKind; 5] = [
        StickKind::LinearLoading,
        StickKind::LinearProgress,
        StickKind::CircularLoading,
        StickKind::CircularProgress,
        StickKind::CircularReversibleProgress,
    ];

    pub fn shape(self) -> Shape {
        match self {
            Self::LinearLoading | Self::LinearProgress => Shape::Linear,
            Self::CircularLoading | Self::CircularProgress | Self::CircularReversibleProgress => {
                Shape::Ring
            }
        }
    }

    pub fn motion(self) -> Motion {
        match self {
            Self::CircularLoading | Self::CircularProgress => Motion::Wrap,
            Self::LinearLoading | Self::LinearProgress | Self::CircularReversibleProgress => {
                Motion::Bounce
            }
        }
    }

    /// `None` for loading kinds.
    pub fn fill_mode(self) -> Option<FillMode> {
        match self {
            Self::LinearLoading | Self::CircularLoading => None,
            Self::LinearProgress | Self::CircularReversibleProgress => Some(FillMode::FromStart),
            Self::CircularProgress => Some(FillMode::Symmetric),
        }
    }

    pub fn is_progress(self) -> bool {
        self.fill_mode().is_some()
    }

    /// Only ring loading alternates its colours lap by lap.
    pub fn swaps_lap_colors(self) -> bool {
        matches!(self, Self::CircularLoading)
    }
}
