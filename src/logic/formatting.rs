use crate::peripherals::sonar::Range;

fn u32_len(num: u32) -> u8 {
    if num == 0 {
        return 1;
    }
    let mut count = 0;
    let mut num = num;
    while num > 0 {
        num /= 10_u32;
        count += 1;
    }
    count
}

// Fits any u32 with a short unit: 10 digits, a space and up to 5 bytes of unit
pub fn format_u32_measurement(value: u32, pad_main: u8, unit: &str) -> heapless::String<16> {
    let mut output: heapless::String<16> = heapless::String::new();

    let int_len = u32_len(value);
    for _ in 0..(pad_main - int_len.min(pad_main)) {
        output.push(' ').ok();
    }
    ufmt::uwrite!(output, "{} {}", value, unit).ok();

    output
}

/// Right aligned range for the log, "---" when nothing was in range
pub fn format_range(range: Range) -> heapless::String<16> {
    match range {
        Range::Target(cm) => format_u32_measurement(cm as u32, 3, "cm"),
        Range::OutOfRange => {
            let mut output: heapless::String<16> = heapless::String::new();
            output.push_str("--- cm").ok();
            output
        }
    }
}
