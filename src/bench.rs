//! Re-export some internals for benchmarking purposes; available with feature = "bench".

use crate::{XsumLarge, XsumSmall};

impl XsumSmall {
  pub fn bench_carry_propagate(&mut self) -> usize {
    self.0.carry_propagate()
  }

  pub fn bench_add_no_carry(&mut self, value: f64) {
    self.0.ensure_budget();
    self.0.add_no_carry(value);
    self.0.adds_until_propagate -= 1;
  }
}

impl XsumLarge {
  pub fn bench_transfer_to_small(&mut self) {
    self.0.transfer_to_small()
  }
}

// Export these for inspection with `cargo asm`.

#[unsafe(no_mangle)]
pub fn small_add(acc: &mut XsumSmall, value: f64) {
  acc.0.add(value)
}

#[unsafe(no_mangle)]
pub fn small_add_list(acc: &mut XsumSmall, values: &[f64]) {
  acc.0.add_list(values)
}

#[unsafe(no_mangle)]
pub fn small_round(acc: &mut XsumSmall) -> f64 {
  acc.0.round()
}

#[unsafe(no_mangle)]
pub fn large_add(acc: &mut XsumLarge, value: f64) {
  acc.0.add(value)
}

#[unsafe(no_mangle)]
pub fn large_add_list(acc: &mut XsumLarge, values: &[f64]) {
  acc.0.add_list(values)
}

#[unsafe(no_mangle)]
pub fn large_round(acc: &mut XsumLarge) -> f64 {
  acc.0.round()
}
