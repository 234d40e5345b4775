use gs_core::Error;

/// Piecewise-linear palette over evenly spaced anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colormap {
    name: &'static str,
    anchors: &'static [[u8; 3]],
    reversed: bool,
}

const PALETTES: &[(&str, &[[u8; 3]])] = &[
    ("gray", &[[0, 0, 0], [255, 255, 255]]),
    ("grey", &[[0, 0, 0], [255, 255, 255]]),
    (
        "viridis",
        &[
            [68, 1, 84],
            [59, 82, 139],
            [33, 145, 140],
            [94, 201, 98],
            [253, 231, 37],
        ],
    ),
    (
        "magma",
        &[
            [0, 0, 4],
            [81, 18, 124],
            [183, 55, 121],
            [252, 137, 97],
            [252, 253, 191],
        ],
    ),
    ("hot", &[[0, 0, 0], [230, 0, 0], [255, 210, 0], [255, 255, 255]]),
    (
        "jet",
        &[
            [0, 0, 128],
            [0, 0, 255],
            [0, 255, 255],
            [255, 255, 0],
            [255, 0, 0],
            [128, 0, 0],
        ],
    ),
];

impl Colormap {
    /// Looks up a palette by name. A `_r` suffix reverses it.
    pub fn by_name(name: &str) -> Result<Self, Error> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };
        PALETTES
            .iter()
            .find(|(n, _)| *n == base)
            .map(|&(name, anchors)| Self {
                name,
                anchors,
                reversed,
            })
            .ok_or_else(|| Error::Renderer(format!("unknown colormap '{name}'")))
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        PALETTES.iter().map(|(n, _)| *n)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Maps `t` in `[0, 1]` to a color. Out-of-range values are clamped.
    pub fn map(&self, t: f32) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed { 1.0 - t } else { t };

        let segments = self.anchors.len() - 1;
        let pos = t * segments as f32;
        let i = (pos.floor() as usize).min(segments - 1);
        let frac = pos - i as f32;

        let a = self.anchors[i];
        let b = self.anchors[i + 1];
        let mut out = [0u8; 3];
        for c in 0..3 {
            let v = a[c] as f32 + (b[c] as f32 - a[c] as f32) * frac;
            out[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        out
    }
}
