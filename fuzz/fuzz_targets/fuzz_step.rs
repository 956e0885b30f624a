#![no_main]

use arbitrary::Arbitrary;
use lifegrid::sim::{check_aged_invariants, check_invariants, Parallelism};
use lifegrid::{apply_brush, GridState, RuleSet, UpdateEngine};
use libfuzzer_sys::fuzz_target;

/// A small grid, a sequence of brush strokes and a number of steps.
#[derive(Arbitrary, Debug)]
struct StepInput {
    width: u8,
    height: u8,
    rule: u8,
    cells: Vec<bool>,
    strokes: Vec<(i16, i16, u8, bool)>,
    steps: u8,
}

fuzz_target!(|input: StepInput| {
    let width = usize::from(input.width % 64) + 1;
    let height = usize::from(input.height % 64) + 1;
    let rule = RuleSet::ALL[usize::from(input.rule) % RuleSet::ALL.len()];

    let mut cells = input.cells;
    cells.resize(width * height, false);
    let Ok(mut grid) = GridState::from_cells(width, height, cells) else {
        return;
    };

    // Brush strokes must stay clipped and never panic
    for (x, y, size, alive) in input.strokes.into_iter().take(32) {
        let changed = apply_brush(&mut grid, i64::from(x), i64::from(y), usize::from(size % 16), alive);
        assert!(changed <= grid.area());
    }
    assert!(check_invariants(&grid).is_empty(), "brush broke dead-age invariant");

    let mut seq = grid.clone();
    let mut seq_engine = UpdateEngine::new(rule).with_parallelism(Parallelism::Sequential);
    let mut par_engine = UpdateEngine::new(rule).with_parallelism(Parallelism::Parallel);

    for _ in 0..(input.steps % 16) {
        let before = grid.population();
        let result = par_engine.step(&mut grid);
        let seq_result = seq_engine.step(&mut seq);

        assert_eq!(result, seq_result, "parallel and sequential counts differ");
        assert_eq!(before + result.births - result.deaths, grid.population());
        let violations = check_aged_invariants(&grid);
        assert!(violations.is_empty(), "invariants violated after step: {violations:?}");
    }
    assert_eq!(grid, seq, "parallel and sequential grids differ");
});
