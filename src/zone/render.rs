//! ASCII frames of a zone
//!
//! Sprites are spliced into void-filled rows, then each row gets cosmetic
//! noise. Noise is visual only and never touches the occupancy grid.

use rand::Rng;

use crate::zone::Zone;

/// One sprite row positioned on a frame row
struct Segment<'a> {
    x: i32,
    cells: &'a [char],
}

impl Zone {
    /// Render the zone with the given noise percentages.
    ///
    /// Output has exactly `height` lines of exactly `width` characters.
    pub fn draw(&mut self, positive_noise: u32, negative_noise: u32) -> String {
        let void = self.config.render.void;
        let matter = self.config.render.matter;

        // Stable sort of a view: ties keep insertion order, and the
        // simulation list itself is left alone
        let mut visible: Vec<_> = self
            .objects
            .iter()
            .filter_map(|obj| obj.position.map(|pos| (pos, obj)))
            .collect();
        visible.sort_by_key(|(pos, _)| pos.y);

        let mut frame = Vec::with_capacity(self.height);
        for y in 0..self.height as i32 {
            let mut segments: Vec<Segment<'_>> = visible
                .iter()
                .take_while(|(pos, _)| pos.y <= y)
                .filter_map(|(pos, obj)| {
                    let row = usize::try_from(y - pos.y).ok()?;
                    obj.shape.line(row).map(|cells| Segment { x: pos.x, cells })
                })
                .collect();
            segments.sort_by_key(|segment| segment.x);

            let mut line = vec![void; self.width];
            for segment in &segments {
                for (i, &cell) in segment.cells.iter().enumerate() {
                    let x = segment.x + i as i32;
                    if x >= 0 && (x as usize) < self.width {
                        line[x as usize] = cell;
                    }
                }
            }
            add_distortion(&mut line, positive_noise, matter, &mut self.rng);
            add_distortion(&mut line, negative_noise, void, &mut self.rng);
            frame.push(line.into_iter().collect::<String>());
        }
        frame.join("\n")
    }

    /// `draw` with the configured noise levels
    pub fn render_frame(&mut self) -> String {
        let render = &self.config.render;
        let (positive, negative) = (render.positive_noise, render.negative_noise);
        self.draw(positive, negative)
    }

    /// Raw vacancy grid: void for vacant cells, matter for occupied ones
    pub fn draw_occupancy_grid(&self) -> String {
        let void = self.config.render.void;
        let matter = self.config.render.matter;
        self.occupancy
            .rows()
            .map(|row| {
                row.iter()
                    .map(|&vacant| if vacant { void } else { matter })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Overwrite `width * percent / 100` random cells of `line` with `symbol`
fn add_distortion<R: Rng + ?Sized>(line: &mut [char], percent: u32, symbol: char, rng: &mut R) {
    if line.is_empty() {
        return;
    }
    let count = line.len() * percent as usize / 100;
    for _ in 0..count {
        let x = rng.gen_range(0..line.len());
        line[x] = symbol;
    }
}
