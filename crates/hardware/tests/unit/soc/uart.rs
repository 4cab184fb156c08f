//! UART peripheral tests.

use rv32sim_core::soc::Device;
use rv32sim_core::soc::devices::Uart;

const STATUS: u32 = 0x00;
const BAUDRATE: u32 = 0x04;
const INTERRUPT: u32 = 0x08;
const RECV: u32 = 0x0C;
const SEND: u32 = 0x10;

#[test]
fn transmit_accumulates_until_drained() {
    let mut uart = Uart::new();
    for byte in b"hello" {
        uart.write(SEND, u32::from(*byte), 0b1111);
    }
    assert_eq!(uart.take_output(), b"hello");
    assert_eq!(uart.take_output(), b"", "drain empties the buffer");
}

#[test]
fn status_reflects_receive_queue() {
    let mut uart = Uart::new();
    assert_eq!(uart.read(STATUS), 0b01, "TX always ready, RX empty");
    uart.push_input(b'z');
    assert_eq!(uart.read(STATUS), 0b11);
    assert_eq!(uart.read(RECV), u32::from(b'z'));
    assert_eq!(uart.read(STATUS), 0b01);
}

#[test]
fn recv_pops_in_fifo_order() {
    let mut uart = Uart::new();
    uart.push_input(b'a');
    uart.push_input(b'b');
    assert_eq!(uart.read(RECV), u32::from(b'a'));
    assert_eq!(uart.read(RECV), u32::from(b'b'));
    assert_eq!(uart.read(RECV), 0, "empty queue reads zero");
}

#[test]
fn interrupt_follows_enable_and_queue_state() {
    let mut uart = Uart::new();
    uart.push_input(b'a');
    assert!(!uart.tick(), "interrupt disabled by default");
    uart.write(INTERRUPT, 1, 0b1111);
    assert!(uart.tick());
    let _ = uart.read(RECV);
    assert!(!uart.tick(), "draining the queue drops the line");
}

#[test]
fn baudrate_is_reported() {
    let mut uart = Uart::new();
    assert_eq!(uart.read(BAUDRATE), 115_200);
}
