#![no_main]

use circular_queue::fuzzing::{
    ArbitraryInitialCapacity, QueueOperation, fuzz_test_dynamic_queue_operations,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (ArbitraryInitialCapacity, Vec<QueueOperation>)| {
    fuzz_test_dynamic_queue_operations(input);
});
