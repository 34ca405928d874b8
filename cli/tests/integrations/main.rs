mod eval;
#[cfg(unix)]
mod run;
