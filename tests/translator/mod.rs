mod tests_pgsphere;
mod tests_postgres;
