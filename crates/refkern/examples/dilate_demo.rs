//! Example: dilate a synthetic image and check an "accelerated" result.
//!
//! Builds a 9x7 image with two bright spots, runs the dilation reference
//! kernel, prints both grids, then demonstrates the verification helper by
//! comparing the output against a deliberately corrupted copy.
//!
//! Run from the workspace root:
//!   cargo run -p refkern --example dilate_demo

use refkern::{dilate3x3_u8, exact_match};

const WIDTH: usize = 9;
const HEIGHT: usize = 7;

fn print_grid(label: &str, data: &[u8]) {
    println!("{label}:");
    for row in data.chunks(WIDTH) {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>3}")).collect();
        println!("  {}", cells.join(" "));
    }
    println!();
}

fn main() {
    let mut input = vec![0u8; WIDTH * HEIGHT];
    input[2 * WIDTH + 2] = 200;
    input[5 * WIDTH + 7] = 120;

    let mut output = vec![0u8; WIDTH * HEIGHT];
    dilate3x3_u8(&input, &mut output, WIDTH, HEIGHT).expect("valid buffers");

    print_grid("input", &input);
    print_grid("dilated", &output);

    // A faithful accelerated kernel reproduces the reference bit-exact.
    let cmp = exact_match(&output, &output, WIDTH, HEIGHT, 0).expect("valid buffers");
    println!(
        "self-comparison: passed={} mismatches={}/{}",
        cmp.passed, cmp.mismatches, cmp.total
    );

    // A broken one does not, and the report pinpoints the damage.
    let mut corrupted = output.clone();
    corrupted[3 * WIDTH + 3] ^= 0x40;
    let cmp = exact_match(&corrupted, &output, WIDTH, HEIGHT, 0).expect("valid buffers");
    println!(
        "corrupted comparison: passed={} mismatches={}/{} max_error={} first={:?}",
        cmp.passed, cmp.mismatches, cmp.total, cmp.max_error, cmp.first_mismatch
    );
}
