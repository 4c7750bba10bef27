/// Food: one item on the board at a time, drawn from an immutable catalog.
///
/// Placement is uniform over the whole board and is NOT checked against
/// the snake body; food may briefly sit under the snake.

use rand::Rng;

use super::grid::Position;

/// One catalog entry: what is drawn and what it is worth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoodKind {
    pub glyph: String,
    pub reward: u32,
}

impl FoodKind {
    pub fn new(glyph: &str, reward: u32) -> Self {
        FoodKind { glyph: glyph.to_string(), reward }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Food {
    pub pos: Position,
    pub kind: FoodKind,
}

impl Food {
    pub fn reward(&self) -> u32 {
        self.kind.reward
    }
}

/// Built-in catalog. Apple scores highest.
pub fn default_catalog() -> Vec<FoodKind> {
    vec![
        FoodKind::new("🍎", 20),
        FoodKind::new("🍕", 15),
        FoodKind::new("🍔", 15),
        FoodKind::new("🌮", 12),
        FoodKind::new("🍦", 10),
        FoodKind::new("🍪", 10),
        FoodKind::new("🍩", 8),
        FoodKind::new("🍫", 8),
        FoodKind::new("🥕", 5),
        FoodKind::new("🍇", 5),
    ]
}

/// Pick a uniformly random tile and a uniformly random catalog entry.
///
/// `catalog` must be non-empty; config loading guarantees this.
pub fn generate_food<R: Rng + ?Sized>(rng: &mut R, tile_count: i32, catalog: &[FoodKind]) -> Food {
    let x = rng.gen_range(0..tile_count);
    let y = rng.gen_range(0..tile_count);
    let kind = catalog[rng.gen_range(0..catalog.len())].clone();
    Food { pos: Position::new(x, y), kind }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn food_stays_on_board() {
        let mut rng = StdRng::seed_from_u64(7);
        let catalog = default_catalog();
        for _ in 0..500 {
            let f = generate_food(&mut rng, 20, &catalog);
            assert!(f.pos.in_bounds(20), "{:?}", f.pos);
        }
    }

    #[test]
    fn food_kind_comes_from_catalog() {
        let mut rng = StdRng::seed_from_u64(11);
        let catalog = vec![FoodKind::new("A", 1), FoodKind::new("B", 2)];
        let mut seen = [false; 2];
        for _ in 0..200 {
            let f = generate_food(&mut rng, 5, &catalog);
            let idx = catalog.iter().position(|k| *k == f.kind).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s), "both kinds should be drawn");
    }

    #[test]
    fn fixed_reward_catalog() {
        let mut rng = StdRng::seed_from_u64(3);
        let catalog = vec![FoodKind::new("🍎", 10)];
        let f = generate_food(&mut rng, 20, &catalog);
        assert_eq!(f.reward(), 10);
        assert_eq!(f.kind.glyph, "🍎");
    }

    #[test]
    fn single_tile_board() {
        let mut rng = StdRng::seed_from_u64(0);
        let f = generate_food(&mut rng, 1, &default_catalog());
        assert_eq!(f.pos, Position::new(0, 0));
    }

    #[test]
    fn default_catalog_rewards() {
        let c = default_catalog();
        assert_eq!(c.len(), 10);
        assert_eq!(c[0].reward, 20);
        assert!(c.iter().all(|k| k.reward > 0));
    }
}
