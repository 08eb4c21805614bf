//! Criterion benchmarks for the penalty model and the search loop.
//!
//! Uses synthetic rosters with controlled student overlap so timings
//! reflect instance size rather than one lucky layout.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use examgrid::fitness::score;
use examgrid::ga::{operators::random_solution, SearchConfig, SearchDriver};
use examgrid::model::{Course, ExamGrid, Roster, Solution};

/// Builds a roster of `num_courses` courses drawing `students_per_course`
/// students from a pool of `num_students`, so courses overlap realistically.
fn synthetic_roster(
    num_courses: usize,
    num_students: usize,
    students_per_course: usize,
    rng: &mut StdRng,
) -> Roster {
    let courses = (0..num_courses)
        .map(|i| {
            let students = (0..students_per_course)
                .map(|_| format!("s{}", rng.random_range(0..num_students)))
                .collect();
            Course::new(format!("C{i:03}"), format!("Course {i}"), students)
        })
        .collect();
    Roster::new(courses).unwrap()
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    for (courses, students, per_course) in [(20usize, 200usize, 30usize), (60, 800, 40), (150, 2000, 50)] {
        let mut rng = StdRng::seed_from_u64(42);
        let roster = synthetic_roster(courses, students, per_course, &mut rng);
        let grid = ExamGrid::new(10, 3).unwrap();
        let solution = random_solution(roster.len(), grid, &mut rng);

        group.bench_with_input(
            BenchmarkId::new(format!("c{courses}_s{students}"), courses),
            &(roster, grid, solution),
            |b, (roster, grid, solution)| {
                b.iter(|| black_box(score(black_box(solution), roster, *grid)))
            },
        );
    }
    group.finish();
}

fn bench_evaluate_population(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_population");
    group.sample_size(20);

    let mut rng = StdRng::seed_from_u64(42);
    let roster = synthetic_roster(60, 800, 40, &mut rng);
    let grid = ExamGrid::new(10, 3).unwrap();
    let population: Vec<Solution> = (0..100)
        .map(|_| random_solution(roster.len(), grid, &mut rng))
        .collect();

    for parallel in [false, true] {
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &parallel,
            |b, &parallel| {
                b.iter(|| {
                    black_box(examgrid::ga::eval::evaluate_population(
                        black_box(&population),
                        &roster,
                        grid,
                        parallel,
                    ))
                })
            },
        );
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for (courses, days) in [(15usize, 5usize), (40, 10)] {
        let mut rng = StdRng::seed_from_u64(42);
        let roster = synthetic_roster(courses, 300, 25, &mut rng);
        let grid = ExamGrid::new(days, 3).unwrap();
        let config = SearchConfig::default()
            .with_population_size(50)
            .with_elite_count(5)
            .with_max_generations(40)
            .with_stagnation_limit(0)
            .with_seed(42);

        group.bench_with_input(
            BenchmarkId::new(format!("c{courses}_d{days}"), courses),
            &(roster, grid, config),
            |b, (roster, grid, config)| {
                b.iter(|| {
                    let result = SearchDriver::run(black_box(roster), *grid, black_box(config));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_score, bench_evaluate_population, bench_search);
criterion_main!(benches);
