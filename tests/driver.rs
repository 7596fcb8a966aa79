use mesh_life::vectors::{DEFAULT_DENSITY, DEFAULT_GENERATIONS};
use mesh_life::{Driver, Mesh, MeshConfig, Pattern, TestVectors};
use rand::SeedableRng;

fn driver(n: usize) -> Driver {
    Driver::new(Mesh::with_config(MeshConfig::default().size(n)).unwrap())
}

#[test]
fn load_unload_without_evolve_is_identity() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x10AD);
    for _ in 0..5 {
        let pattern = Pattern::random(10, 0.5, &mut rng).unwrap();
        let mut d = driver(10);
        d.load(&pattern).unwrap();
        assert_eq!(d.unload().unwrap(), pattern);
    }
}

#[test]
fn single_head_cell_round_trip() {
    let pattern = Pattern::with_cells(3, &[(0, 0)]).unwrap();
    let mut d = driver(3);
    d.load(&pattern).unwrap();
    assert!(d.mesh().cell(0, 0).unwrap());
    assert_eq!(d.mesh().population(), 1);
    assert_eq!(d.unload().unwrap(), pattern);
}

#[test]
fn peek_is_non_destructive_between_generations() {
    let blinker = Pattern::with_cells(10, &[(4, 3), (4, 4), (4, 5)]).unwrap();
    let vertical = Pattern::with_cells(10, &[(3, 4), (4, 4), (5, 4)]).unwrap();
    let mut d = driver(10);
    d.load(&blinker).unwrap();
    d.evolve(1).unwrap();
    assert_eq!(d.peek().unwrap(), vertical);
    d.evolve(1).unwrap();
    assert_eq!(d.peek().unwrap(), blinker);
    assert_eq!(d.mesh().generation(), 2);
}

#[test]
fn idle_ticks_between_phases_change_nothing() {
    let pattern = Pattern::with_cells(6, &[(1, 1), (1, 2), (2, 1), (2, 2)]).unwrap();
    let mut d = driver(6);
    d.load(&pattern).unwrap();
    d.idle(10).unwrap();
    d.evolve(3).unwrap();
    d.idle(10).unwrap();
    assert_eq!(d.unload().unwrap(), pattern);
}

#[test]
fn generated_vectors_pass_on_mesh() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x7B);
    for _ in 0..8 {
        let vectors =
            TestVectors::generate(10, DEFAULT_DENSITY, DEFAULT_GENERATIONS, &mut rng).unwrap();
        let mut d = driver(10);
        assert!(vectors.check(&mut d).unwrap());
        assert_eq!(d.mesh().population(), 0);
    }
}

#[test]
fn vectors_survive_text_round_trip_and_check() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0xF11E);
    let vectors =
        TestVectors::generate(10, DEFAULT_DENSITY, DEFAULT_GENERATIONS, &mut rng).unwrap();
    let mut text = Vec::new();
    vectors.write_to(&mut text).unwrap();
    let parsed = TestVectors::parse(std::str::from_utf8(&text).unwrap(), DEFAULT_GENERATIONS)
        .unwrap();
    assert_eq!(parsed, vectors);
    assert!(parsed.check(&mut driver(10)).unwrap());
}

#[test]
fn wrong_expectation_fails_check() {
    let initial = Pattern::with_cells(5, &[(2, 1), (2, 2), (2, 3)]).unwrap();
    let vectors = TestVectors {
        initial: initial.clone(),
        expected: initial,
        generations: 1,
    };
    assert!(!vectors.check(&mut driver(5)).unwrap());
}
