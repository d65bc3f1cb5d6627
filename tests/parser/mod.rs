mod tests_errors;
mod tests_grammar;
mod tests_quick_fix;
