//! Cross-thread hand-off through each strategy.
//!
//! The uncoordinated strategy is exercised under exactly the contract it
//! documents — one producer thread, one consumer thread — and the guarded
//! strategies under the wider topologies they exist for.

use std::thread;

use ringpipe_core::{RingError, StrategyKind};
use ringpipe_std_adapter::{StdPlatform, StdRingBuffer};

use static_cell::StaticCell;

const TRANSFER_LEN: usize = 20_000;

/// One producer thread, one consumer thread, single-byte operations.
/// Every byte must come out exactly once, in order.
fn spsc_byte_stream(kind: StrategyKind) {
    let mut storage = [0u8; 64];
    let rb = StdRingBuffer::create(&mut storage, kind).unwrap();

    thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..TRANSFER_LEN {
                let byte = (i % 251) as u8;
                while rb.write(byte).is_err() {
                    std::hint::spin_loop();
                }
            }
        });

        scope.spawn(|| {
            for i in 0..TRANSFER_LEN {
                let expected = (i % 251) as u8;
                let byte = loop {
                    match rb.read() {
                        Ok(byte) => break byte,
                        Err(RingError::Empty) => std::hint::spin_loop(),
                        Err(other) => panic!("unexpected error: {other:?}"),
                    }
                };
                assert_eq!(byte, expected, "out-of-order byte at position {i}");
            }
        });
    });

    assert!(rb.is_empty());
}

#[test]
fn spsc_uncoordinated() {
    spsc_byte_stream(StrategyKind::Uncoordinated);
}

#[test]
fn spsc_critical_section() {
    spsc_byte_stream(StrategyKind::CriticalSection);
}

#[test]
fn spsc_bulk_transfers() {
    let mut storage = [0u8; 64];
    let rb = StdRingBuffer::create(&mut storage, StrategyKind::Uncoordinated).unwrap();

    let pattern: Vec<u8> = (0..TRANSFER_LEN).map(|i| (i % 251) as u8).collect();

    thread::scope(|scope| {
        let src = &pattern;
        let rb = &rb;
        scope.spawn(move || {
            let mut sent = 0;
            while sent < src.len() {
                let n = rb.write_slice(&src[sent..]);
                if n == 0 {
                    std::hint::spin_loop();
                }
                sent += n;
            }
        });

        scope.spawn(|| {
            let mut received = Vec::with_capacity(TRANSFER_LEN);
            let mut chunk = [0u8; 48];
            while received.len() < TRANSFER_LEN {
                let n = rb.read_slice(&mut chunk);
                if n == 0 {
                    std::hint::spin_loop();
                }
                received.extend_from_slice(&chunk[..n]);
            }
            assert_eq!(received, pattern);
        });
    });
}

#[test]
fn mutex_multi_producer_totals() {
    const PRODUCERS: usize = 4;
    const PER_PRODUCER: usize = 2_500;

    let mut storage = [0u8; 128];
    let rb = StdRingBuffer::create(&mut storage, StrategyKind::MutualExclusion).unwrap();

    thread::scope(|scope| {
        for id in 0..PRODUCERS {
            let rb = &rb;
            scope.spawn(move || {
                let byte = (id + 1) as u8;
                for _ in 0..PER_PRODUCER {
                    while rb.write(byte).is_err() {
                        std::hint::spin_loop();
                    }
                }
            });
        }

        let rb = &rb;
        scope.spawn(move || {
            let mut per_value = [0usize; PRODUCERS + 1];
            let mut total = 0;
            while total < PRODUCERS * PER_PRODUCER {
                match rb.read() {
                    Ok(byte) => {
                        per_value[byte as usize] += 1;
                        total += 1;
                    }
                    Err(_) => std::hint::spin_loop(),
                }
            }
            for id in 1..=PRODUCERS {
                assert_eq!(
                    per_value[id], PER_PRODUCER,
                    "producer {id} bytes lost or duplicated"
                );
            }
        });
    });

    assert!(rb.is_empty());
}

// The full embedded allocation pattern on a hosted target: storage and
// buffer both live in statics, threads get plain 'static references.
#[test]
fn static_storage_hand_off() {
    static STORAGE: StaticCell<[u8; 32]> = StaticCell::new();
    static BUFFER: StaticCell<StdRingBuffer<'static>> = StaticCell::new();

    let storage = STORAGE.init([0; 32]);
    let rb: &'static StdRingBuffer<'static> = BUFFER.init(
        ringpipe_core::RingBuffer::<StdPlatform>::create(storage, StrategyKind::Uncoordinated)
            .unwrap(),
    );

    let producer = thread::spawn(move || {
        for byte in 0..100u8 {
            while rb.write(byte).is_err() {
                std::hint::spin_loop();
            }
        }
    });
    let consumer = thread::spawn(move || {
        for expected in 0..100u8 {
            let byte = loop {
                if let Ok(byte) = rb.read() {
                    break byte;
                }
                std::hint::spin_loop();
            };
            assert_eq!(byte, expected);
        }
    });

    producer.join().unwrap();
    consumer.join().unwrap();
    assert!(rb.is_empty());
}
