//! Growth measurement of array lookups.
//!
//! Measures indexed access (O(1)-ish), a random linear search (O(n)), and a
//! worst-case miss search (full O(n) scan) over shuffled arrays of growing
//! size, then writes JSON/CSV reports and a chart payload with the
//! comparison curves.
//!
//! Run with:
//!   cargo run --example array_growth

use growbench::prelude::*;
use rand::Rng;
use rand::seq::SliceRandom;
use std::hint::black_box;

fn main() -> Result<(), growbench::RunError> {
    let outcome = Job::new(|size| {
        let mut data: Vec<usize> = (0..size).collect();
        data.shuffle(&mut rand::thread_rng());
        data
    })
    .steps(6)
    .min_size(1000)
    .step_size(2000)
    .report("#at", {
        let mut rng = rand::thread_rng();
        move |v: &Vec<usize>, size| {
            black_box(v[rng.gen_range(0..size)]);
        }
    })
    .report("#index", {
        let mut rng = rand::thread_rng();
        move |v: &Vec<usize>, size| {
            let needle = rng.gen_range(0..size);
            black_box(v.iter().position(|&x| x == needle));
        }
    })
    .report("#miss", |v: &Vec<usize>, size| {
        // Values are 0..size, so searching for `size` scans the whole array.
        black_box(v.iter().position(|&x| x == size));
    })
    .compare(true)
    .json("array_growth.json")
    .csv("array_growth.csv")
    .chart_data("array_growth_chart.json")
    .run()?;

    print!("{}", growbench::format_human_output(&outcome.report));

    for failure in &outcome.failures {
        eprintln!("skipped: {failure}");
    }

    Ok(())
}
