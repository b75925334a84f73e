use termion::color::{self, Rgb};

use colorgrad::{Color, Gradient, GradientBuilder, LinearGradient};

use crate::error::{CardError, CardResult};

/// Two-stop horizontal color fade.
pub struct Fade {
    gradient: LinearGradient,
}

impl Fade {
    pub fn new(from: Rgb, to: Rgb) -> CardResult<Self> {
        let gradient = GradientBuilder::new()
            .colors(&[
                Color::from_rgba8(from.0, from.1, from.2, 255),
                Color::from_rgba8(to.0, to.1, to.2, 255),
            ])
            .build::<LinearGradient>()
            .map_err(|e| CardError::Gradient(e.to_string()))?;

        Ok(Fade { gradient })
    }

    /// Samples `steps` evenly spaced colors across the gradient domain,
    /// first and last landing exactly on the two stops.
    pub fn colors(&self, steps: usize) -> Vec<Rgb> {
        let (min, max) = self.gradient.domain();
        let delta = max - min;
        // a single step has nothing to interpolate towards
        let lower = (steps.max(2) - 1) as f32;

        (0..steps)
            .map(|i| min + (i as f32 * delta) / lower)
            .map(|t| self.gradient.at(t).to_rgba8())
            .map(|[r, g, b, _]| Rgb(r, g, b))
            .collect()
    }

    /// Paints every visible character by its column, so all lines of a block
    /// share one left-to-right fade. Line breaks are kept as they are and each
    /// painted line ends with a foreground reset.
    pub fn paint(&self, text: &str) -> String {
        let width = text.split('\n').map(|l| l.chars().count()).max().unwrap_or(0);
        let colors = self.colors(width);

        let mut out = String::with_capacity(text.len() * 8);
        for (idx, line) in text.split('\n').enumerate() {
            if idx > 0 {
                out.push('\n');
            }

            let mut painted = false;
            for (col, c) in line.chars().enumerate() {
                if c.is_whitespace() {
                    out.push(c);
                    continue;
                }

                out.push_str(&color::Fg(colors[col]).to_string());
                out.push(c);
                painted = true;
            }

            if painted {
                out.push_str(&color::Fg(color::Reset).to_string());
            }
        }

        out
    }
}
