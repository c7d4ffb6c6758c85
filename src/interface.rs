pub trait DisplayInterface {
    fn send_command(&mut self, cmd: u8) -> Result<(), ()>;
    fn send_data(&mut self, buf: &[u8]) -> Result<(), ()>;
}

pub mod spi {
    //! The SPI interface supports the "4-wire" wiring of the controller, where each word on the
    //! SPI bus is 8 bits and a D/C GPIO distinguishes command from data bytes. Chip select is
    //! strobed around each command byte and each data run, which the controller tolerates even
    //! in the middle of a RAM write: the armed address window survives until the next command.

    use embedded_hal as hal;
    use hal::digital::v2::OutputPin;

    use super::DisplayInterface;

    pub struct SpiInterface<SPI, DC, CS> {
        /// The SPI master device connected to the ST7789.
        spi: SPI,
        /// A GPIO output pin connected to the D/C (data/command) pin of the ST7789 (the fourth
        /// "wire" of "4-wire" mode).
        dc: DC,
        /// A GPIO output pin connected to the chip select pin of the ST7789, active low.
        cs: CS,
    }

    impl<SPI, DC, CS> SpiInterface<SPI, DC, CS>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: OutputPin,
        CS: OutputPin,
    {
        /// Create a new SPI interface to communicate with the display driver. `spi` is the SPI
        /// master device, `dc` is the GPIO output pin connected to the D/C pin, and `cs` the
        /// GPIO output pin connected to the chip select pin of the ST7789.
        pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
            Self { spi, dc, cs }
        }

        /// Tear down the interface and recover the bus and pins.
        pub fn release(self) -> (SPI, DC, CS) {
            (self.spi, self.dc, self.cs)
        }
    }

    impl<SPI, DC, CS> DisplayInterface for SpiInterface<SPI, DC, CS>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: OutputPin,
        CS: OutputPin,
    {
        fn send_command(&mut self, cmd: u8) -> Result<(), ()> {
            self.dc.set_low().map_err(|_| ())?;
            self.cs.set_low().map_err(|_| ())?;
            let res = self.spi.write(&[cmd]).map_err(|_| ());
            self.cs.set_high().map_err(|_| ())?;
            self.dc.set_high().map_err(|_| ())?;
            res
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), ()> {
            self.dc.set_high().map_err(|_| ())?;
            self.cs.set_low().map_err(|_| ())?;
            let res = self.spi.write(buf).map_err(|_| ());
            self.cs.set_high().map_err(|_| ())?;
            res
        }
    }
}

#[cfg(test)]
pub mod test_spy {
    //! An interface for use in unit tests to spy on whatever was sent to it.

    use std::cell::RefCell;
    use std::rc::Rc;

    use super::DisplayInterface;

    /// One transaction observed by the spy.
    #[derive(Clone, Debug, PartialEq)]
    pub enum Sent {
        Cmd(u8),
        Data(Vec<u8>),
    }

    pub struct TestSpyInterface {
        sent: Rc<RefCell<Vec<Sent>>>,
    }

    impl TestSpyInterface {
        pub fn new() -> Self {
            TestSpyInterface {
                sent: Rc::new(RefCell::new(Vec::new())),
            }
        }

        /// Create another handle to the same recording, so that one can be moved into the
        /// display under test while the original stays behind to make assertions.
        pub fn split(&self) -> Self {
            TestSpyInterface {
                sent: self.sent.clone(),
            }
        }

        pub fn clear(&mut self) {
            self.sent.borrow_mut().clear()
        }

        /// Everything sent so far, for tests that want to count or decode transactions.
        pub fn sent(&self) -> Vec<Sent> {
            self.sent.borrow().clone()
        }

        /// Check that exactly one command was sent, with exactly `data` as its arguments.
        pub fn check(&self, cmd: u8, data: &[u8]) {
            let sent = self.sent.borrow();
            if data.is_empty() {
                assert_eq!(*sent, vec![Sent::Cmd(cmd)]);
            } else {
                assert_eq!(*sent, vec![Sent::Cmd(cmd), Sent::Data(data.to_vec())]);
            }
        }

        /// Check the complete sequence of commands and data runs sent so far.
        pub fn check_multi(&self, expect: &[Sent]) {
            assert_eq!(*self.sent.borrow(), expect);
        }
    }

    impl DisplayInterface for TestSpyInterface {
        fn send_command(&mut self, cmd: u8) -> Result<(), ()> {
            self.sent.borrow_mut().push(Sent::Cmd(cmd));
            Ok(())
        }
        fn send_data(&mut self, data: &[u8]) -> Result<(), ()> {
            self.sent.borrow_mut().push(Sent::Data(data.to_vec()));
            Ok(())
        }
    }
}
