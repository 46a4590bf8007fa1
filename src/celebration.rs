use crate::config::ConfettiConfig;
use crate::language::Rgb;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::SystemTime;

const FESTIVE_COLORS: [Rgb; 6] = [
    Rgb(0xF4, 0xEB, 0x13),
    Rgb(0xE2, 0x68, 0x0F),
    Rgb(0x2E, 0xD3, 0xE9),
    Rgb(0x59, 0x91, 0x37),
    Rgb(0xD0, 0x2B, 0x2B),
    Rgb(0xF9, 0xF4, 0xDA),
];

const SOMBER_COLORS: [Rgb; 4] = [
    Rgb(0x6E, 0x6E, 0x6E),
    Rgb(0x4A, 0x55, 0x68),
    Rgb(0x2D, 0x51, 0x9F),
    Rgb(0x8B, 0x8B, 0x8B),
];

/// Which effect to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Celebratory,
    Somber,
}

impl Mood {
    pub fn palette(&self) -> &'static [Rgb] {
        match self {
            Mood::Celebratory => &FESTIVE_COLORS,
            Mood::Somber => &SOMBER_COLORS,
        }
    }

    fn symbols(&self) -> &'static [char] {
        match self {
            Mood::Celebratory => &['▪', '■', '●', '◆', '*', '✦'],
            Mood::Somber => &['·', ',', '.', '\''],
        }
    }
}

/// One falling piece of confetti
#[derive(Debug, Clone)]
pub struct ConfettiPiece {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color: Rgb,
    pub age: f64,
    pub max_age: f64,
}

impl ConfettiPiece {
    fn new(mood: Mood, width: f64) -> Self {
        let mut rng = rand::thread_rng();

        let (vel_x, vel_y) = match mood {
            Mood::Celebratory => (rng.gen_range(-3.0..3.0), rng.gen_range(-4.0..1.0)),
            // somber pieces drift straight down like rain
            Mood::Somber => (rng.gen_range(-0.3..0.3), rng.gen_range(0.0..2.0)),
        };

        Self {
            x: rng.gen_range(0.0..width.max(1.0)),
            y: rng.gen_range(-3.0..1.0),
            vel_x,
            vel_y,
            symbol: *mood.symbols().choose(&mut rng).unwrap_or(&'*'),
            color: *mood.palette().choose(&mut rng).unwrap_or(&Rgb(255, 255, 255)),
            age: 0.0,
            max_age: rng.gen_range(2.0..4.0),
        }
    }

    fn update(&mut self, dt: f64, gravity: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += gravity * dt;

        self.age += dt;
        self.age < self.max_age
    }
}

/// Confetti overlay played when a session ends
#[derive(Debug)]
pub struct Confetti {
    pub pieces: Vec<ConfettiPiece>,
    pub mood: Mood,
    pub piece_count: usize,
    pub gravity: f64,
    pub start_time: SystemTime,
    pub duration: f64, // seconds
    pub is_active: bool,
    pub terminal_width: f64,
    pub terminal_height: f64,
}

impl Confetti {
    pub fn new(piece_count: usize, gravity: f64) -> Self {
        Self {
            pieces: Vec::new(),
            mood: Mood::Celebratory,
            piece_count,
            gravity,
            start_time: SystemTime::now(),
            duration: 4.0,
            is_active: false,
            terminal_width: 80.0,
            terminal_height: 24.0,
        }
    }

    pub fn from_config(cfg: &ConfettiConfig) -> Self {
        Self::new(cfg.pieces, cfg.gravity)
    }

    pub fn start(&mut self, mood: Mood, width: u16, height: u16) {
        self.pieces.clear();
        self.mood = mood;
        self.start_time = SystemTime::now();
        self.is_active = true;
        self.terminal_width = width as f64;
        self.terminal_height = height as f64;

        // a loss gets a lighter drizzle
        let count = match mood {
            Mood::Celebratory => self.piece_count,
            Mood::Somber => self.piece_count / 2,
        };
        for _ in 0..count {
            self.pieces.push(ConfettiPiece::new(mood, self.terminal_width));
        }
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.pieces.clear();
    }

    pub fn update(&mut self) {
        if !self.is_active {
            return;
        }

        let elapsed = self.start_time.elapsed().unwrap_or_default().as_secs_f64();
        if elapsed >= self.duration {
            self.stop();
            return;
        }

        let dt = 0.1; // Fixed timestep for animation
        let gravity = match self.mood {
            Mood::Celebratory => self.gravity,
            Mood::Somber => self.gravity / 3.0,
        };
        let buffer = 5.0;
        let (width, height) = (self.terminal_width, self.terminal_height);
        self.pieces.retain_mut(|piece| {
            let still_alive = piece.update(dt, gravity);
            let off_screen =
                piece.y > height + buffer || piece.x < -buffer || piece.x > width + buffer;
            still_alive && !off_screen
        });
    }
}

impl Default for Confetti {
    fn default() -> Self {
        Self::from_config(&ConfettiConfig::default())
    }
}
