mod tests_db_checker;
mod tests_features;
mod tests_validation;
