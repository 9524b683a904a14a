use std::io::Cursor;

use rand::Rng;

use ncom::{
    decode_aligned, read_packets, scan_packets, PacketA, StatusChannel, Time, SYNC_BYTE,
};

/// Random bytes guaranteed to contain no sync byte, like the pre/postamble
/// the logging frontends put around captured NCOM data.
fn noise(len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let mut b: u8 = rng.gen();
            while b == SYNC_BYTE {
                b = rng.gen();
            }
            b
        })
        .collect()
}

fn sample_packet(millis: u16) -> PacketA {
    PacketA {
        time: Time::new(millis).unwrap(),
        acceleration_x: 0.25,
        acceleration_z: -9.81,
        angular_rate_y: 0.05,
        navigation_status: 4,
        latitude: 0.904_530_1,
        longitude: -0.032_791_9,
        altitude: 0.000_021_5,
        north_velocity: 1.5,
        heading: -1.25,
        status_channel: Some(StatusChannel::Raw {
            channel: 23,
            payload: [1, 2, 3, 4, 5, 6, 7, 8],
        }),
        ..PacketA::default()
    }
}

#[test]
fn packet_hidden_in_noise_is_recovered() {
    let mut rng = rand::thread_rng();
    let buf = sample_packet(31_000).encode();
    let expected = PacketA::decode_at(&buf).unwrap();

    let mut dat = noise(rng.gen_range(100..200));
    dat.extend_from_slice(&buf);
    dat.extend_from_slice(&noise(rng.gen_range(100..200)));

    let packets: Vec<PacketA> = scan_packets(&dat).collect();
    assert_eq!(packets.len(), 1);
    assert_eq!(packets[0], expected);
}

#[test]
fn packet_with_no_surrounding_noise_is_recovered() {
    let buf = sample_packet(0).encode();
    let expected = PacketA::decode_at(&buf).unwrap();

    let packets: Vec<PacketA> = scan_packets(&buf).collect();
    assert_eq!(packets, [expected]);
}

#[test]
fn capture_with_interleaved_noise_yields_all_packets() {
    let mut rng = rand::thread_rng();
    let mut dat = Vec::new();
    for millis in (0..5).map(|i| i * 7) {
        dat.extend_from_slice(&noise(rng.gen_range(0..50)));
        dat.extend_from_slice(&sample_packet(millis).encode());
    }
    dat.extend_from_slice(&noise(rng.gen_range(0..50)));

    let times: Vec<u16> = scan_packets(&dat).map(|p| p.time.millis()).collect();
    assert_eq!(times, [0, 7, 14, 21, 28]);
}

#[test]
fn stream_and_slice_scans_agree() {
    let mut rng = rand::thread_rng();
    let mut dat = noise(rng.gen_range(10..40));
    for millis in [100u16, 200, 300] {
        dat.extend_from_slice(&sample_packet(millis).encode());
        dat.extend_from_slice(&noise(rng.gen_range(10..40)));
    }

    let scanned: Vec<PacketA> = scan_packets(&dat).collect();
    let streamed: Vec<PacketA> = read_packets(Cursor::new(&dat))
        .collect::<ncom::Result<_>>()
        .unwrap();
    assert_eq!(scanned, streamed);
}

#[test]
fn aligned_capture_decodes_in_parallel() {
    let mut dat = Vec::new();
    for millis in 0..64u16 {
        dat.extend_from_slice(&sample_packet(millis).encode());
    }

    let packets = decode_aligned(&dat).unwrap();
    assert_eq!(packets.len(), 64);
    let scanned: Vec<PacketA> = scan_packets(&dat).collect();
    assert_eq!(packets, scanned);
}
