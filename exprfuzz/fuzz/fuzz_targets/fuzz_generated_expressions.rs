#![no_main]

use exprfuzz::{evaluate_str, ExpressionGenerator, FuzzError, GeneratorConfig, ReferenceLimits};
use libfuzzer_sys::fuzz_target;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Every generated expression must be accepted by the reference grammar.
fuzz_target!(|seed: u64| {
    let mut rng = StdRng::seed_from_u64(seed);
    let config = GeneratorConfig::default();
    let expression = ExpressionGenerator::new(&mut rng, &config).generate();

    match evaluate_str(&expression.to_string(), &ReferenceLimits::default()) {
        Ok(_) | Err(FuzzError::DivisionByZero(_)) => {}
        Err(e) => panic!("Generated expression '{}' rejected: {}", expression, e),
    }
});
