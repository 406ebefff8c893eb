use crate::foundation::core::MatrixSize;

/// Which effect family is currently producing frames.
///
/// The variant shape makes invalid flag combinations unrepresentable:
/// pollination excludes everything else, movement and swarm are mutually
/// exclusive, and split/breathing combine freely with either a geometric
/// subject or a swarm. [`ActiveComposition::enable`] reproduces the
/// flag-toggle semantics of configuration surfaces on top of this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ActiveComposition {
    /// The staggered multi-actor flower choreography; exclusive with all
    /// other effects.
    Pollination,
    /// Single flying subject with optional sub-effects.
    Geometric {
        /// Four-quadrant split compositor.
        split: bool,
        /// Sinusoidal scale breathing.
        breathing: bool,
        /// Random-waypoint movement.
        moving: bool,
    },
    /// Multi-actor swarm with optional sub-effects.
    Swarm {
        /// Independent per-quadrant populations with clipped drawing.
        split: bool,
        /// Breathing envelope applied to actor scale.
        breathing: bool,
    },
}

impl Default for ActiveComposition {
    fn default() -> Self {
        Self::Geometric {
            split: false,
            breathing: false,
            moving: false,
        }
    }
}

/// Individual effect toggles exposed to configuration surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EffectFlag {
    /// Four-quadrant split.
    Split,
    /// Multi-actor swarm.
    Swarm,
    /// Random-waypoint movement.
    Move,
    /// Sinusoidal scale breathing.
    Breathing,
    /// Pollination choreography.
    Pollination,
}

impl ActiveComposition {
    /// Enable one flag, clearing whatever it excludes: pollination clears
    /// everything else; movement clears swarm and pollination; swarm clears
    /// movement and pollination; split and breathing only clear pollination.
    #[must_use]
    pub fn enable(self, flag: EffectFlag) -> Self {
        match flag {
            EffectFlag::Pollination => Self::Pollination,
            EffectFlag::Move => match self {
                Self::Geometric {
                    split, breathing, ..
                }
                | Self::Swarm { split, breathing } => Self::Geometric {
                    split,
                    breathing,
                    moving: true,
                },
                Self::Pollination => Self::Geometric {
                    split: false,
                    breathing: false,
                    moving: true,
                },
            },
            EffectFlag::Swarm => match self {
                Self::Geometric {
                    split, breathing, ..
                }
                | Self::Swarm { split, breathing } => Self::Swarm { split, breathing },
                Self::Pollination => Self::Swarm {
                    split: false,
                    breathing: false,
                },
            },
            EffectFlag::Split => match self {
                Self::Geometric {
                    breathing, moving, ..
                } => Self::Geometric {
                    split: true,
                    breathing,
                    moving,
                },
                Self::Swarm { breathing, .. } => Self::Swarm {
                    split: true,
                    breathing,
                },
                Self::Pollination => Self::Geometric {
                    split: true,
                    breathing: false,
                    moving: false,
                },
            },
            EffectFlag::Breathing => match self {
                Self::Geometric { split, moving, .. } => Self::Geometric {
                    split,
                    breathing: true,
                    moving,
                },
                Self::Swarm { split, .. } => Self::Swarm {
                    split,
                    breathing: true,
                },
                Self::Pollination => Self::Geometric {
                    split: false,
                    breathing: true,
                    moving: false,
                },
            },
        }
    }

    /// Disable one flag; disabling pollination returns the default geometric
    /// composition.
    #[must_use]
    pub fn disable(self, flag: EffectFlag) -> Self {
        match (self, flag) {
            (Self::Pollination, EffectFlag::Pollination) => Self::default(),
            (Self::Geometric { breathing, moving, .. }, EffectFlag::Split) => Self::Geometric {
                split: false,
                breathing,
                moving,
            },
            (Self::Geometric { split, moving, .. }, EffectFlag::Breathing) => Self::Geometric {
                split,
                breathing: false,
                moving,
            },
            (Self::Geometric { split, breathing, .. }, EffectFlag::Move) => Self::Geometric {
                split,
                breathing,
                moving: false,
            },
            (Self::Swarm { breathing, .. }, EffectFlag::Split) => Self::Swarm {
                split: false,
                breathing,
            },
            (Self::Swarm { split, .. }, EffectFlag::Breathing) => Self::Swarm {
                split,
                breathing: false,
            },
            (Self::Swarm { split, breathing }, EffectFlag::Swarm) => Self::Geometric {
                split,
                breathing,
                moving: false,
            },
            (other, _) => other,
        }
    }

    /// Whether the given flag is currently in effect.
    pub fn is_enabled(self, flag: EffectFlag) -> bool {
        match (self, flag) {
            (Self::Pollination, EffectFlag::Pollination) => true,
            (Self::Pollination, _) => false,
            (Self::Geometric { split, .. }, EffectFlag::Split) => split,
            (Self::Geometric { breathing, .. }, EffectFlag::Breathing) => breathing,
            (Self::Geometric { moving, .. }, EffectFlag::Move) => moving,
            (Self::Geometric { .. }, _) => false,
            (Self::Swarm { .. }, EffectFlag::Swarm) => true,
            (Self::Swarm { split, .. }, EffectFlag::Split) => split,
            (Self::Swarm { breathing, .. }, EffectFlag::Breathing) => breathing,
            (Self::Swarm { .. }, _) => false,
        }
    }
}

/// Parameters governing swarm actor generation.
///
/// Changing any of these is a structural change: the whole actor arena is
/// discarded and regenerated, because speed spacing is derived jointly
/// across the population.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SwarmParams {
    /// Number of actors per population.
    pub count: usize,
    /// Lower bound of the per-actor speed spread.
    pub speed_min: f64,
    /// Upper bound of the per-actor speed spread.
    pub speed_max: f64,
    /// Lower bound of the per-actor size multiplier.
    pub size_min: f64,
    /// Upper bound of the per-actor size multiplier.
    pub size_max: f64,
}

impl Default for SwarmParams {
    fn default() -> Self {
        Self {
            count: 8,
            speed_min: 2.0,
            speed_max: 6.0,
            size_min: 0.7,
            size_max: 1.3,
        }
    }
}

impl SwarmParams {
    /// Auto-correct invalid values by nudging the conflicting bound, logging
    /// each adjustment. Actor generation always receives a valid
    /// (min < max, positive) range from this.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();

        if self.count == 0 {
            tracing::warn!("swarm count 0 adjusted to 1");
            self.count = 1;
        }

        for (name, value, fallback) in [
            ("speed_min", &mut self.speed_min, defaults.speed_min),
            ("speed_max", &mut self.speed_max, defaults.speed_max),
            ("size_min", &mut self.size_min, defaults.size_min),
            ("size_max", &mut self.size_max, defaults.size_max),
        ] {
            if !value.is_finite() || *value <= 0.0 {
                tracing::warn!(param = name, from = *value, to = fallback, "swarm bound adjusted");
                *value = fallback;
            }
        }

        if self.speed_min >= self.speed_max {
            let to = self.speed_min + 0.5;
            tracing::warn!(from = self.speed_max, to, "speed_max nudged above speed_min");
            self.speed_max = to;
        }
        if self.size_min >= self.size_max {
            let to = self.size_min + 0.1;
            tracing::warn!(from = self.size_max, to, "size_max nudged above size_min");
            self.size_max = to;
        }
        self
    }
}

/// Engine-wide configuration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Matrix edge length shared by all frames and effects in the session.
    pub size: MatrixSize,
    /// Base sprite scale for geometric effects.
    pub scale: f64,
    /// Swarm generation parameters.
    pub swarm: SwarmParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: MatrixSize::X64,
            scale: 0.5,
            swarm: SwarmParams::default(),
        }
    }
}

impl EngineConfig {
    /// Auto-correct out-of-range scalars, logging each adjustment.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            tracing::warn!(from = self.scale, to = 0.5, "scale adjusted");
            self.scale = 0.5;
        } else if self.scale > 2.0 {
            tracing::warn!(from = self.scale, to = 2.0, "scale clamped");
            self.scale = 2.0;
        }
        self.swarm = self.swarm.normalized();
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
