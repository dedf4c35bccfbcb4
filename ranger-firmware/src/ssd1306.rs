//! SSD1306 OLED Display Driver
//!
//! Driver for 128x32 SSD1306-based OLED displays via I2C. Drawing goes
//! into a local frame buffer; `present` streams it page by page.

use ranger_display::{Canvas, FrameBuffer, Surface, SurfaceError};

/// SSD1306 I2C address (typically 0x3C or 0x3D)
const SSD1306_ADDR: u8 = 0x3C;

/// Display dimensions
const WIDTH: usize = 128;
const PAGES: usize = 4;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_RANGE: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    /// Frame buffer in controller page layout
    frame: FrameBuffer<WIDTH, PAGES>,
    initialized: bool,
}

impl<I2C> Ssd1306<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    /// Create a new SSD1306 driver
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            frame: FrameBuffer::new(),
            initialized: false,
        }
    }

    /// Send a command to the display
    async fn command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
        self.i2c.write(SSD1306_ADDR, &[0x00, cmd]).await
    }

    async fn send_init_sequence(&mut self) -> Result<(), I2C::Error> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            0x1F, // 32 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEMORY_MODE,
            0x00,                  // Horizontal addressing
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x02, // Sequential COM config for 32 rows
            cmd::SET_CONTRAST,
            0x8F,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::RESUME_RAM,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c).await?;
        }

        Ok(())
    }

    /// Flush the frame buffer to the display
    async fn flush(&mut self) -> Result<(), I2C::Error> {
        // Full window; the controller auto-increments across pages
        for &c in &[
            cmd::SET_COLUMN_ADDR,
            0,
            (WIDTH - 1) as u8,
            cmd::SET_PAGE_RANGE,
            0,
            (PAGES - 1) as u8,
        ] {
            self.command(c).await?;
        }

        for page in 0..PAGES {
            let mut data = [0u8; WIDTH + 1];
            data[0] = 0x40; // Data mode
            data[1..].copy_from_slice(&self.frame.pages()[page]);
            self.i2c.write(SSD1306_ADDR, &data).await?;
        }

        Ok(())
    }
}

impl<I2C> Canvas for Ssd1306<I2C> {
    fn clear(&mut self) {
        self.frame.clear();
    }

    fn draw_text(&mut self, x: i32, y: i32, scale: u8, text: &str) {
        self.frame.draw_text(x, y, scale, text);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.frame.draw_line(x0, y0, x1, y1);
    }

    fn size(&self) -> (u32, u32) {
        Canvas::size(&self.frame)
    }
}

impl<I2C> Surface for Ssd1306<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    async fn init(&mut self) -> Result<(), SurfaceError> {
        self.send_init_sequence()
            .await
            .map_err(|_| SurfaceError::Communication)?;
        self.initialized = true;
        Ok(())
    }

    async fn present(&mut self) -> Result<(), SurfaceError> {
        if !self.initialized {
            return Err(SurfaceError::NotInitialized);
        }
        self.flush().await.map_err(|_| SurfaceError::Communication)
    }
}
