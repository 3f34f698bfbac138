// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_paginate::{
    ChangeEvent, InternalRowPolicy, LinearLayout, ListAdapter, LoadingAdapter,
    PaginationCallbacks, Paginator, ViewType,
};

struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_range_usize(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        (self.next_u32() as usize) % upper_exclusive
    }
}

#[derive(Clone, Debug)]
struct Feed(usize);

impl ListAdapter for Feed {
    type Row = usize;
    type Payload = ();

    fn item_count(&self) -> usize {
        self.0
    }

    fn create_row(&mut self, _view_type: ViewType) -> usize {
        0
    }

    fn bind_row(&mut self, row: &mut usize, index: usize) {
        *row = index;
    }
}

/// Never loading, so every boundary in range fires.
struct Eager;

impl PaginationCallbacks for Eager {
    fn on_load_more(&mut self) {}

    fn is_loading(&self) -> bool {
        false
    }

    fn has_loaded_all_items(&self) -> bool {
        false
    }

    fn on_load_more_from_start(&mut self) {}

    fn has_loaded_all_items_from_start(&self) -> bool {
        false
    }
}

fn decorated(len: usize) -> LoadingAdapter<Feed> {
    let mut adapter =
        LoadingAdapter::new(Feed(len)).with_internal_row_policy(InternalRowPolicy::Granular);
    adapter.set_start_loading(true);
    adapter.set_end_loading(true);
    adapter
        .set_internal_start(Some(len / 3))
        .expect("interior anchor");
    adapter
        .set_internal_end(Some(2 * len / 3))
        .expect("interior anchor");
    adapter
}

fn bench_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate/map");

    for len in [1_024usize, 16_384, 131_072] {
        let adapter = decorated(len);
        let count = adapter.item_count();
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("to_inner", len), &adapter, |b, adapter| {
            b.iter(|| {
                let sum = (0..count)
                    .filter_map(|position| adapter.to_inner(position))
                    .fold(0_usize, usize::wrapping_add);
                black_box(sum);
            });
        });

        group.bench_with_input(BenchmarkId::new("from_inner", len), &adapter, |b, adapter| {
            b.iter(|| {
                let sum = (0..len)
                    .map(|index| adapter.from_inner(index))
                    .fold(0_usize, usize::wrapping_add);
                black_box(sum);
            });
        });
    }

    group.finish();
}

fn bench_on_scrolled(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate/on_scrolled");
    let ticks = 4_096usize;
    group.throughput(Throughput::Elements(ticks as u64));

    for len in [256usize, 65_536] {
        let mut rng = Lcg::new(0xC0FF_EE00 ^ len as u64);
        let ranges: Vec<(usize, usize)> = (0..ticks)
            .map(|_| {
                let first = rng.gen_range_usize(len);
                (first, first + rng.gen_range_usize(24))
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(len), &ranges, |b, ranges| {
            b.iter_batched(
                || {
                    let mut paginator = Paginator::builder(Eager)
                        .adapter(Feed(len))
                        .layout(LinearLayout::new(len + 3))
                        .internal_callbacks(Eager)
                        .build()
                        .expect("adapter and layout are set");
                    paginator.set_has_more_data_to_load(true);
                    paginator.set_has_more_data_to_load_on_start(true);
                    paginator
                        .set_has_more_internal_data_to_load(Some(len / 2))
                        .expect("interior anchor");
                    paginator
                },
                |mut paginator| {
                    let mut fired = 0_u32;
                    for &(first, last) in ranges {
                        paginator.layout_mut().set_visible(first, last);
                        fired += paginator.on_scrolled().bits().count_ones();
                    }
                    black_box(fired);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_forwarding(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate/forward");
    let edits = 1_024usize;
    group.throughput(Throughput::Elements(edits as u64));

    for len in [1_024usize, 65_536] {
        let mut rng = Lcg::new(0x5EED ^ len as u64);
        let script: Vec<(bool, usize)> = (0..edits)
            .map(|_| (rng.next_u32() & 1 == 0, rng.next_u32() as usize))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(len), &script, |b, script| {
            b.iter_batched(
                || {
                    let mut adapter = decorated(len);
                    adapter.register_observer(|event: &ChangeEvent<()>| {
                        black_box(event);
                    });
                    adapter
                },
                |mut adapter| {
                    for &(insert, raw) in script {
                        adapter.update_inner(|feed, changes| {
                            let at = raw % feed.0;
                            if insert {
                                feed.0 += 1;
                                changes.push(ChangeEvent::Inserted { start: at, count: 1 });
                            } else if feed.0 > 1 {
                                feed.0 -= 1;
                                changes.push(ChangeEvent::Removed {
                                    start: at.min(feed.0),
                                    count: 1,
                                });
                            }
                        });
                    }
                    black_box(adapter.item_count());
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_mapping, bench_on_scrolled, bench_forwarding);
criterion_main!(benches);
