pub mod generate_output;
