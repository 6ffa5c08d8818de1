//! Contract Test: Playback Timing
//!
//! Verifies the exact on/off timeline the player produces, in virtual time.
//!
//! Constraints verified:
//! - The LED is switched off immediately, before the first pause
//! - Ten repetitions, each preceded by a 3.0s pause
//! - One pulse per numeral symbol, each followed by a 0.2s settle gap
//! - 1.0s after every digit and 1.0s per separator

mod common;

use blinkip_core::traits::SignalLevel;
use blinkip_core::{BlinkPlayer, DigitString, Polarity, PulseDevice};
use common::*;
use std::time::Duration;

/// Expected (time, level) writes for one repetition starting at `offset`
fn expect_pulses(offset: Duration, pulses: &[(u64, u64)]) -> Vec<(Duration, SignalLevel)> {
    pulses
        .iter()
        .flat_map(|&(on_at, length)| {
            [
                (offset + ms(on_at), SignalLevel::High),
                (offset + ms(on_at + length), SignalLevel::Low),
            ]
        })
        .collect()
}

fn writes(log: &SinkLog) -> Vec<(Duration, SignalLevel)> {
    log.events()
        .into_iter()
        .filter_map(|e| match e.action {
            SinkAction::Write(level) => Some((e.at, level)),
            SinkAction::Handoff(_) => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn single_digit_timeline() {
    let (sink, log) = RecordingSink::new();
    let device = PulseDevice::new(Box::new(sink), Polarity::Normal, "mmc0");
    let digits = DigitString::parse("5").unwrap();

    BlinkPlayer::new(device).play(&digits).await.unwrap();

    // 3.0 pause + 0.4 on + 0.2 settle + 1.0 digit gap
    let round = ms(4600);
    let mut expected = vec![(Duration::ZERO, SignalLevel::Low)];
    for n in 0..10u32 {
        expected.extend(expect_pulses(round * n, &[(3000, 400)]));
    }
    expected.push((round * 10, SignalLevel::Low));

    assert_eq!(writes(&log), expected);
}

#[tokio::test(start_paused = true)]
async fn two_octet_timeline() {
    let (sink, log) = RecordingSink::new();
    let device = PulseDevice::new(Box::new(sink), Polarity::Normal, "mmc0");
    let digits = DigitString::parse("12.5").unwrap();

    BlinkPlayer::new(device).play(&digits).await.unwrap();

    // 3.0 | I 0.3 | 1.0 | II 0.6 | 1.0 | '.' 1.0 | V 0.6 | 1.0
    let round = ms(8500);
    let per_round = [(3000, 100), (4300, 100), (4600, 100), (6900, 400)];

    let mut expected = vec![(Duration::ZERO, SignalLevel::Low)];
    for n in 0..10u32 {
        expected.extend(expect_pulses(round * n, &per_round));
    }
    expected.push((round * 10, SignalLevel::Low));

    assert_eq!(writes(&log), expected);
}

#[tokio::test(start_paused = true)]
async fn pulses_per_repetition_follow_numeral_lengths() {
    for text in ["0", "4", "88", "1.254", "000"] {
        let (sink, log) = RecordingSink::new();
        let device = PulseDevice::new(Box::new(sink), Polarity::Normal, "mmc0");
        let digits = DigitString::parse(text).unwrap();

        BlinkPlayer::new(device).play(&digits).await.unwrap();

        let lit = log
            .levels()
            .into_iter()
            .filter(|l| *l == SignalLevel::High)
            .count();
        assert_eq!(lit, 10 * digits.pulse_count().unwrap(), "{text}");
    }
}

#[tokio::test(start_paused = true)]
async fn inverted_polarity_flips_every_write() {
    let (sink, log) = RecordingSink::new();
    let device = PulseDevice::new(Box::new(sink), Polarity::Inverted, "mmc0");
    let digits = DigitString::parse("1").unwrap();

    BlinkPlayer::new(device).play(&digits).await.unwrap();

    let levels = log.levels();
    assert_eq!(levels.first(), Some(&SignalLevel::High), "off is \"1\" when inverted");
    assert_eq!(levels.last(), Some(&SignalLevel::High));
    assert_eq!(
        levels.iter().filter(|l| **l == SignalLevel::Low).count(),
        10,
        "one lit write per repetition"
    );
}
