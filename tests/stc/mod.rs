mod tests_coord_sys;
mod tests_region;
