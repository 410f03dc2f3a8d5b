mod md020_test;
mod md030_test;
mod md031_test;
mod md037_test;
