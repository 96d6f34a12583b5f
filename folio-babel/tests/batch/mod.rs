//! Batch run tests over the fixture scrape

mod run;
