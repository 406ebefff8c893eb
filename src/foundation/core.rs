use crate::foundation::error::{ColibriError, ColibriResult};

pub use kurbo::{Point, Vec2};

/// Supported square matrix edge lengths.
///
/// The edge is fixed for the lifetime of a composition run; changing it
/// invalidates all per-actor state (see [`crate::Engine::set_matrix_size`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MatrixSize {
    /// 32×32 matrix.
    X32,
    /// 64×64 matrix.
    X64,
}

impl MatrixSize {
    /// Parse an edge length; only 32 and 64 are supported.
    pub fn from_edge(edge: u32) -> ColibriResult<Self> {
        match edge {
            32 => Ok(Self::X32),
            64 => Ok(Self::X64),
            other => Err(ColibriError::validation(format!(
                "matrix edge must be 32 or 64, got {other}"
            ))),
        }
    }

    /// Edge length in pixels.
    pub fn n(self) -> usize {
        match self {
            Self::X32 => 32,
            Self::X64 => 64,
        }
    }

    /// Edge length as `f64`, for trajectory math.
    pub fn nf(self) -> f64 {
        self.n() as f64
    }

    /// Quadrant edge length (`n / 2`).
    pub fn half(self) -> usize {
        self.n() / 2
    }
}

/// One RGB pixel. All channels zero means empty (background) by convention;
/// there is no alpha channel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, Hash,
)]
pub struct Pixel {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Pixel {
    /// The empty (background) pixel.
    pub const EMPTY: Pixel = Pixel { r: 0, g: 0, b: 0 };

    /// Build a pixel from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Whether this pixel is the empty background value.
    pub fn is_empty(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

/// An N×N grid of pixels, row-major. Every frame produced by the engine has
/// exactly N×N pixels for the session's [`MatrixSize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    size: MatrixSize,
    pixels: Vec<Pixel>,
}

impl Frame {
    /// A frame with every pixel empty.
    pub fn empty(size: MatrixSize) -> Self {
        Self {
            size,
            pixels: vec![Pixel::EMPTY; size.n() * size.n()],
        }
    }

    /// Build a frame from row-major pixel data; the length must be exactly N².
    pub fn from_pixels(size: MatrixSize, pixels: Vec<Pixel>) -> ColibriResult<Self> {
        let expected = size.n() * size.n();
        if pixels.len() != expected {
            return Err(ColibriError::validation(format!(
                "frame expects {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self { size, pixels })
    }

    /// A frame filled with one solid color.
    pub fn solid(size: MatrixSize, px: Pixel) -> Self {
        Self {
            size,
            pixels: vec![px; size.n() * size.n()],
        }
    }

    /// The matrix size this frame was built for.
    pub fn size(&self) -> MatrixSize {
        self.size
    }

    /// Bounds-checked read; `None` outside the matrix.
    pub fn get(&self, x: i64, y: i64) -> Option<Pixel> {
        let n = self.size.n() as i64;
        if x < 0 || y < 0 || x >= n || y >= n {
            return None;
        }
        Some(self.pixels[(y * n + x) as usize])
    }

    /// Bounds-checked write; out-of-range coordinates are silently skipped.
    pub fn set(&mut self, x: i64, y: i64, px: Pixel) {
        let n = self.size.n() as i64;
        if x < 0 || y < 0 || x >= n || y >= n {
            return;
        }
        self.pixels[(y * n + x) as usize] = px;
    }

    /// Raw row-major pixel data.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Iterate rows top to bottom; each row has exactly N pixels. This is the
    /// `[N][N][3]` shape expected by external exporters.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels.chunks_exact(self.size.n())
    }

    /// Number of non-empty pixels. Useful for tests and diagnostics.
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| !p.is_empty()).count()
    }
}

/// One of the 4 fixed equal-size regions of the matrix used by split effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Quadrant {
    /// Top-left region, index 0.
    TopLeft,
    /// Top-right region, index 1.
    TopRight,
    /// Bottom-left region, index 2.
    BottomLeft,
    /// Bottom-right region, index 3.
    BottomRight,
}

impl Quadrant {
    /// All quadrants in index order (the order split effects process them).
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Stable quadrant index in `0..4`.
    pub fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }

    /// Pixel offset of this quadrant's top-left corner.
    pub fn origin(self, size: MatrixSize) -> (usize, usize) {
        let h = size.half();
        match self {
            Self::TopLeft => (0, 0),
            Self::TopRight => (h, 0),
            Self::BottomLeft => (0, h),
            Self::BottomRight => (h, h),
        }
    }
}

/// Monotonic engine tick counter.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Tick(pub u64);

/// Injected time sample for one engine tick.
///
/// Tick-counted timing (pollination phases, waypoint pauses) reads `tick`;
/// wall-clock-style sinusoids (breathing, wobble, lingering durations) read
/// `elapsed_secs`. Neither is read from an ambient clock, so a run is
/// deterministic given a supplied time sequence.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TickCtx {
    /// Tick counter since the engine was (re)started.
    pub tick: Tick,
    /// Elapsed seconds since the same epoch; must be finite and >= 0.
    pub elapsed_secs: f64,
}

impl TickCtx {
    /// A context for tick `tick` under a fixed scheduler interval.
    pub fn at(tick: u64, tick_interval_secs: f64) -> Self {
        Self {
            tick: Tick(tick),
            elapsed_secs: tick as f64 * tick_interval_secs,
        }
    }
}
