
// Evaluator tests
mod evaluation;
