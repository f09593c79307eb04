use crate::foundation::core::Rgba8;

/// Premultiplied RGBA in the unit range. Only lives inside the blend kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PremulF32 {
    pub(crate) r: f32,
    pub(crate) g: f32,
    pub(crate) b: f32,
    pub(crate) a: f32,
}

impl PremulF32 {
    pub(crate) fn from_straight(c: Rgba8) -> Self {
        let a = unit(c.a);
        Self {
            r: unit(c.r) * a,
            g: unit(c.g) * a,
            b: unit(c.b) * a,
            a,
        }
    }

    /// Porter-Duff "over": `self + dst * (1 - self.a)` on every channel, alpha included.
    pub(crate) fn over(self, dst: Self) -> Self {
        let k = 1.0 - self.a;
        Self {
            r: self.r + dst.r * k,
            g: self.g + dst.g * k,
            b: self.b + dst.b * k,
            a: self.a + dst.a * k,
        }
    }

    /// Divide the alpha back out. Zero coverage maps to fully transparent black.
    pub(crate) fn to_straight(self) -> Rgba8 {
        if self.a <= 0.0 {
            return Rgba8::TRANSPARENT;
        }
        Rgba8 {
            r: to_channel(self.r / self.a),
            g: to_channel(self.g / self.a),
            b: to_channel(self.b / self.a),
            a: to_channel(self.a),
        }
    }
}

pub(crate) fn unit(c: u8) -> f32 {
    f32::from(c) / 255.0
}

pub(crate) fn to_channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
