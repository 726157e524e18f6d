//! Benchmarks for keymap resolution
//!
//! Run with: cargo bench keymap

use nvim_wizard::catalog::Plugin;
use nvim_wizard::keymap::{
    active_actions, compute_conflicts, parse_chord, reconcile_defaults, ChordRecorder, KeyPress,
    KeymapOverrides,
};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn all_plugins() -> Vec<String> {
    Plugin::known().iter().map(|p| p.id()).collect()
}

#[divan::bench]
fn conflicts_all_plugins_defaults(bencher: divan::Bencher) {
    let active = active_actions(&all_plugins());
    let keymaps = KeymapOverrides::new();
    bencher.bench_local(|| compute_conflicts(divan::black_box(&active), &keymaps));
}

#[divan::bench]
fn conflicts_every_action_colliding(bencher: divan::Bencher) {
    let active = active_actions(&all_plugins());
    let keymaps: KeymapOverrides = active
        .iter()
        .map(|a| (a.id().to_string(), "<leader>x".to_string()))
        .collect();
    bencher.bench_local(|| compute_conflicts(divan::black_box(&active), &keymaps));
}

#[divan::bench]
fn reconcile_from_empty(bencher: divan::Bencher) {
    let active = active_actions(&all_plugins());
    let keymaps = KeymapOverrides::new();
    bencher.bench_local(|| reconcile_defaults(divan::black_box(&active), &keymaps).apply(&keymaps));
}

#[divan::bench]
fn record_leader_chord(bencher: divan::Bencher) {
    let presses: Vec<KeyPress> = ["space", "f", "g"]
        .iter()
        .filter_map(|d| KeyPress::parse(d))
        .collect();
    bencher.bench_local(|| ChordRecorder::record(" ", divan::black_box(presses.iter().copied())));
}

#[divan::bench(args = ["<leader>ff", "<C-\\><C-n><C-w>h", "<leader<x"])]
fn parse_chord_tokens(chord: &str) -> Vec<String> {
    parse_chord(divan::black_box(chord))
}
