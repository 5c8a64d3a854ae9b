
mod slot_test;
