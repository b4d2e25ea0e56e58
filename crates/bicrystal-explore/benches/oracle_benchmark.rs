// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use bicrystal_bnb::oracle::BacktrackingOracle;
use bicrystal_explore::oracle::LatticeOracle;
use bicrystal_model::{builder::LatticeModelBuilder, triple::CounterTriple};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn oracle(side: usize, num_solute: usize, hints: bool) -> LatticeOracle<BacktrackingOracle> {
    let model = LatticeModelBuilder::new(side, num_solute)
        .build()
        .expect("valid lattice parameters");
    LatticeOracle::from_model(model, BacktrackingOracle::new).with_pruning_hints(hints)
}

fn bench_single_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("lattice_query");
    let cases = [
        ("feasible", CounterTriple::new(2, 1, 1)),
        ("infeasible", CounterTriple::new(0, 0, 0)),
        ("over_ceiling", CounterTriple::new(0, 0, 4)),
    ];

    for hints in [true, false] {
        let mut oracle = oracle(4, 3, hints);
        for (label, triple) in cases {
            let id = BenchmarkId::new(label, if hints { "hints" } else { "no_hints" });
            group.bench_function(id, |b| {
                b.iter(|| {
                    let verdict = oracle
                        .classify(black_box(triple))
                        .expect("backtracking backend always decides");
                    black_box(verdict)
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_single_queries);
criterion_main!(benches);
