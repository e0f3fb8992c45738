//! Elementary cellular automaton used as a deterministic mask pattern source
//!
//! A rule number encodes the next state for each of the eight 3-cell
//! neighborhoods. Bit `left * 4 + center * 2 + right` of the rule is the state
//! a cell takes when its previous-generation neighborhood matches.

use crate::intervals::mask::Mask;
use crate::io::configuration::{
    AUTOMATON_CELL_SIZE, AUTOMATON_LARGE_AXIS, AUTOMATON_LARGE_CELL_SIZE, RECOMMENDED_RULES,
};
use crate::io::error::{Result, invalid_parameter};
use rand::Rng;

/// Next-state lookup for all eight neighborhoods of `rule`
pub fn rule_table(rule: u8) -> [bool; 8] {
    let mut table = [false; 8];
    for (neighborhood, next) in table.iter_mut().enumerate() {
        *next = (rule >> neighborhood) & 1 == 1;
    }
    table
}

/// Evolve `rule` for `generations` rows over a row of `width` cells
///
/// Generation 0 holds a single live cell at the center of the row and cells
/// beyond either end of the row are permanently dead. Row `y` of the returned
/// mask is generation `y`.
pub fn generate(rule: u8, generations: usize, width: usize) -> Mask {
    let table = rule_table(rule);
    let mut mask = Mask::new(width, generations);
    if width == 0 || generations == 0 {
        return mask;
    }

    let mut current = vec![false; width];
    if let Some(center) = current.get_mut(width / 2) {
        *center = true;
    }

    for y in 0..generations {
        for (x, &alive) in current.iter().enumerate() {
            mask.set(x, y, alive);
        }

        let next: Vec<bool> = (0..width)
            .map(|x| {
                let left = x.checked_sub(1).and_then(|i| current.get(i)).copied();
                let center = current.get(x).copied();
                let right = current.get(x + 1).copied();
                let neighborhood = usize::from(left.unwrap_or(false)) * 4
                    + usize::from(center.unwrap_or(false)) * 2
                    + usize::from(right.unwrap_or(false));
                table.get(neighborhood).copied().unwrap_or(false)
            })
            .collect();
        current = next;
    }

    mask
}

/// Check a configured rule number fits the 256 elementary rules
///
/// # Errors
///
/// Returns an invalid parameter error for rule numbers above 255
pub fn validate_rule(rule: u32) -> Result<u8> {
    u8::try_from(rule).map_err(|_overflow| {
        invalid_parameter("rule", &rule, &"must be an elementary rule between 0 and 255")
    })
}

/// Draw one of the rules known to produce interesting patterns
pub fn choose_rule<R: Rng>(rng: &mut R) -> u8 {
    let index = rng.random_range(0..RECOMMENDED_RULES.len());
    RECOMMENDED_RULES.get(index).copied().unwrap_or(30)
}

/// Pixel size of one automaton cell along an axis of `axis_len` pixels
pub const fn cell_size(axis_len: usize) -> usize {
    if axis_len > AUTOMATON_LARGE_AXIS {
        AUTOMATON_LARGE_CELL_SIZE
    } else {
        AUTOMATON_CELL_SIZE
    }
}

/// Automaton pattern scaled to cover a `width` x `height` image
///
/// The automaton runs on a coarse grid of cells and is scaled up with
/// nearest-neighbor lookup, so each cell becomes a block of pixels.
pub fn automaton_mask(rule: u8, width: usize, height: usize) -> Mask {
    let cells_x = width.div_ceil(cell_size(width)).max(1);
    let generations = height.div_ceil(cell_size(height)).max(1);
    generate(rule, generations, cells_x).scaled(width, height)
}
