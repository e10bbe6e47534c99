use serde::Deserialize;

/// Size of the stage as authored, captured once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageGeometry {
    pub width: f64,
    pub height: f64,
    pub aspect: f64,
}

impl StageGeometry {
    pub fn new(width: f64, height: f64) -> Self {
        let aspect = if height > 0.0 { width / height } else { 0.0 };
        Self {
            width,
            height,
            aspect,
        }
    }

    fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Placement of the stage: pixel offset of its unscaled box plus a uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageLayout {
    pub scale: f64,
    pub offset_x: i64,
    pub offset_y: i64,
}

/// Center the stage at its original size and shrink it to fit the viewport.
///
/// The stage is never magnified: a viewport at least as large as the stage in
/// both dimensions gives a scale of 1. Otherwise the dimension that is
/// tighter relative to the stage aspect ratio decides the scale.
pub fn compute_layout(viewport: Viewport, stage: &StageGeometry) -> StageLayout {
    let offset_x = js_round((viewport.width - stage.width) / 2.0);
    let offset_y = js_round((viewport.height - stage.height) / 2.0);

    let fits = viewport.width >= stage.width && viewport.height >= stage.height;
    let scale = if fits || stage.is_degenerate() || viewport.width <= 0.0 || viewport.height <= 0.0
    {
        1.0
    } else if viewport.width / viewport.height > stage.aspect {
        viewport.height / stage.height
    } else {
        viewport.width / stage.width
    };

    StageLayout {
        scale,
        offset_x,
        offset_y,
    }
}

/// `Math.round`: halves round towards positive infinity.
fn js_round(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// The CSS primitive used to apply the stage scale.
///
/// Chosen once per presentation. Both variants express the same uniform scale;
/// engines differ in which one they animate smoothly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TransformStyle {
    /// `transform: scale(s)`
    #[serde(rename = "scale")]
    Scale2d,
    /// `-webkit-transform: scale3d(s, s, 1)`
    #[serde(rename = "scale3d")]
    Scale3d,
}

impl TransformStyle {
    pub fn detect(user_agent: &str) -> Self {
        if user_agent.contains("Firefox") {
            Self::Scale2d
        } else {
            Self::Scale3d
        }
    }

    pub fn property(&self) -> &'static str {
        match self {
            Self::Scale2d => "transform",
            Self::Scale3d => "-webkit-transform",
        }
    }

    pub fn value(&self, scale: f64) -> String {
        match self {
            Self::Scale2d => format!("scale({scale})"),
            Self::Scale3d => format!("scale3d({scale}, {scale}, 1)"),
        }
    }
}
