mod common;
mod evaluation;
mod gate;
mod rules;
