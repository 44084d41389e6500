// Input identifiers: devices, key codes, gamepad elements and stick directions

use winit::keyboard::KeyCode;

/// Raw trigger code as stored in a binding. `0` means "no trigger".
pub type TriggerCode = u16;

/// Sentinel trigger code meaning "unbound"
pub const NO_TRIGGER: TriggerCode = 0;

/// Codes above this value denote analog stick directions on a gamepad
pub const ANALOG_CODE_BASE: TriggerCode = 100;

/// Index of a local player (0-based)
pub type PlayerId = usize;

/// Kind of controller a binding listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Keyboard,
    Gamepad,
}

/// Analog stick on a gamepad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stick {
    Left = 0,
    Right = 1,
}

impl Stick {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Cardinal direction of a stick tilt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickDirection {
    Up,
    Down,
    Left,
    Right,
}

/// How a binding's trigger code is evaluated for a given device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Key or button press, optionally requiring a double press
    Digital { code: TriggerCode, double_tap: bool },
    /// Analog stick crossing the activation threshold in one direction
    Stick {
        stick: Stick,
        direction: StickDirection,
    },
}

impl Trigger {
    /// Resolve a raw code for a device.
    ///
    /// Returns `None` for the "none" sentinel and for synthetic gamepad codes
    /// that do not name a stick direction. Keyboards never use the analog path,
    /// so codes above 100 stay digital there (F4 and up live in that range).
    pub fn resolve(device: Device, code: TriggerCode, double_tap: bool) -> Option<Self> {
        if code == NO_TRIGGER {
            return None;
        }
        if device == Device::Gamepad && code > ANALOG_CODE_BASE {
            return GamepadElement::from_code(code)
                .and_then(GamepadElement::stick_direction)
                .map(|(stick, direction)| Trigger::Stick { stick, direction });
        }
        Some(Trigger::Digital { code, double_tap })
    }
}

/// Keyboard key identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum KeyId {
    A = 1,
    B = 2,
    C = 3,
    D = 4,
    E = 5,
    F = 6,
    G = 7,
    H = 8,
    I = 9,
    J = 10,
    K = 11,
    L = 12,
    M = 13,
    N = 14,
    O = 15,
    P = 16,
    Q = 17,
    R = 18,
    S = 19,
    T = 20,
    U = 21,
    V = 22,
    W = 23,
    X = 24,
    Y = 25,
    Z = 26,
    NumRow0 = 27,
    NumRow1 = 28,
    NumRow2 = 29,
    NumRow3 = 30,
    NumRow4 = 31,
    NumRow5 = 32,
    NumRow6 = 33,
    NumRow7 = 34,
    NumRow8 = 35,
    NumRow9 = 36,
    Keypad0 = 37,
    Keypad1 = 38,
    Keypad2 = 39,
    Keypad3 = 40,
    Keypad4 = 41,
    Keypad5 = 42,
    Keypad6 = 43,
    Keypad7 = 44,
    Keypad8 = 45,
    Keypad9 = 46,
    KeypadDel = 47,
    KeypadDivide = 48,
    KeypadMultiply = 49,
    KeypadSubtract = 50,
    KeypadAdd = 51,
    KeypadEnter = 52,
    KeypadEquals = 53,
    Space = 54,
    Backspace = 55,
    Tab = 56,
    Clear = 57,
    Return = 58,
    Pause = 59,
    Escape = 60,
    BackQuote = 87,
    Delete = 88,
    UpArrow = 89,
    DownArrow = 90,
    RightArrow = 91,
    LeftArrow = 92,
    Insert = 93,
    Home = 94,
    End = 95,
    PageUp = 96,
    PageDown = 97,
    F1 = 98,
    F2 = 99,
    F3 = 100,
    F4 = 101,
    F5 = 102,
    F6 = 103,
    F7 = 104,
    F8 = 105,
    F9 = 106,
    F10 = 107,
    F11 = 108,
    F12 = 109,
    F13 = 110,
    F14 = 111,
    F15 = 112,
    Numlock = 113,
    CapsLock = 114,
    ScrollLock = 115,
    RightShift = 116,
    LeftShift = 117,
    RightControl = 118,
    LeftControl = 119,
    RightAlt = 120,
    LeftAlt = 121,
    RightCommand = 122,
    LeftCommand = 123,
    AltGr = 126,
    Help = 127,
    SysReq = 129,
    Break = 130,
    Menu = 131,
}

const ALL_KEYS: [KeyId; 102] = [
    KeyId::A,
    KeyId::B,
    KeyId::C,
    KeyId::D,
    KeyId::E,
    KeyId::F,
    KeyId::G,
    KeyId::H,
    KeyId::I,
    KeyId::J,
    KeyId::K,
    KeyId::L,
    KeyId::M,
    KeyId::N,
    KeyId::O,
    KeyId::P,
    KeyId::Q,
    KeyId::R,
    KeyId::S,
    KeyId::T,
    KeyId::U,
    KeyId::V,
    KeyId::W,
    KeyId::X,
    KeyId::Y,
    KeyId::Z,
    KeyId::NumRow0,
    KeyId::NumRow1,
    KeyId::NumRow2,
    KeyId::NumRow3,
    KeyId::NumRow4,
    KeyId::NumRow5,
    KeyId::NumRow6,
    KeyId::NumRow7,
    KeyId::NumRow8,
    KeyId::NumRow9,
    KeyId::Keypad0,
    KeyId::Keypad1,
    KeyId::Keypad2,
    KeyId::Keypad3,
    KeyId::Keypad4,
    KeyId::Keypad5,
    KeyId::Keypad6,
    KeyId::Keypad7,
    KeyId::Keypad8,
    KeyId::Keypad9,
    KeyId::KeypadDel,
    KeyId::KeypadDivide,
    KeyId::KeypadMultiply,
    KeyId::KeypadSubtract,
    KeyId::KeypadAdd,
    KeyId::KeypadEnter,
    KeyId::KeypadEquals,
    KeyId::Space,
    KeyId::Backspace,
    KeyId::Tab,
    KeyId::Clear,
    KeyId::Return,
    KeyId::Pause,
    KeyId::Escape,
    KeyId::BackQuote,
    KeyId::Delete,
    KeyId::UpArrow,
    KeyId::DownArrow,
    KeyId::RightArrow,
    KeyId::LeftArrow,
    KeyId::Insert,
    KeyId::Home,
    KeyId::End,
    KeyId::PageUp,
    KeyId::PageDown,
    KeyId::F1,
    KeyId::F2,
    KeyId::F3,
    KeyId::F4,
    KeyId::F5,
    KeyId::F6,
    KeyId::F7,
    KeyId::F8,
    KeyId::F9,
    KeyId::F10,
    KeyId::F11,
    KeyId::F12,
    KeyId::F13,
    KeyId::F14,
    KeyId::F15,
    KeyId::Numlock,
    KeyId::CapsLock,
    KeyId::ScrollLock,
    KeyId::RightShift,
    KeyId::LeftShift,
    KeyId::RightControl,
    KeyId::LeftControl,
    KeyId::RightAlt,
    KeyId::LeftAlt,
    KeyId::RightCommand,
    KeyId::LeftCommand,
    KeyId::AltGr,
    KeyId::Help,
    KeyId::SysReq,
    KeyId::Break,
    KeyId::Menu,
];

impl KeyId {
    /// Raw trigger code of this key
    pub fn code(self) -> TriggerCode {
        self as TriggerCode
    }

    /// Look up a key by its raw trigger code
    pub fn from_code(code: TriggerCode) -> Option<Self> {
        ALL_KEYS.iter().copied().find(|key| key.code() == code)
    }

    /// Map a physical winit key to its identifier
    pub fn from_winit(key: KeyCode) -> Option<Self> {
        let id = match key {
            KeyCode::KeyA => KeyId::A,
            KeyCode::KeyB => KeyId::B,
            KeyCode::KeyC => KeyId::C,
            KeyCode::KeyD => KeyId::D,
            KeyCode::KeyE => KeyId::E,
            KeyCode::KeyF => KeyId::F,
            KeyCode::KeyG => KeyId::G,
            KeyCode::KeyH => KeyId::H,
            KeyCode::KeyI => KeyId::I,
            KeyCode::KeyJ => KeyId::J,
            KeyCode::KeyK => KeyId::K,
            KeyCode::KeyL => KeyId::L,
            KeyCode::KeyM => KeyId::M,
            KeyCode::KeyN => KeyId::N,
            KeyCode::KeyO => KeyId::O,
            KeyCode::KeyP => KeyId::P,
            KeyCode::KeyQ => KeyId::Q,
            KeyCode::KeyR => KeyId::R,
            KeyCode::KeyS => KeyId::S,
            KeyCode::KeyT => KeyId::T,
            KeyCode::KeyU => KeyId::U,
            KeyCode::KeyV => KeyId::V,
            KeyCode::KeyW => KeyId::W,
            KeyCode::KeyX => KeyId::X,
            KeyCode::KeyY => KeyId::Y,
            KeyCode::KeyZ => KeyId::Z,
            KeyCode::Digit0 => KeyId::NumRow0,
            KeyCode::Digit1 => KeyId::NumRow1,
            KeyCode::Digit2 => KeyId::NumRow2,
            KeyCode::Digit3 => KeyId::NumRow3,
            KeyCode::Digit4 => KeyId::NumRow4,
            KeyCode::Digit5 => KeyId::NumRow5,
            KeyCode::Digit6 => KeyId::NumRow6,
            KeyCode::Digit7 => KeyId::NumRow7,
            KeyCode::Digit8 => KeyId::NumRow8,
            KeyCode::Digit9 => KeyId::NumRow9,
            KeyCode::Numpad0 => KeyId::Keypad0,
            KeyCode::Numpad1 => KeyId::Keypad1,
            KeyCode::Numpad2 => KeyId::Keypad2,
            KeyCode::Numpad3 => KeyId::Keypad3,
            KeyCode::Numpad4 => KeyId::Keypad4,
            KeyCode::Numpad5 => KeyId::Keypad5,
            KeyCode::Numpad6 => KeyId::Keypad6,
            KeyCode::Numpad7 => KeyId::Keypad7,
            KeyCode::Numpad8 => KeyId::Keypad8,
            KeyCode::Numpad9 => KeyId::Keypad9,
            KeyCode::NumpadDecimal => KeyId::KeypadDel,
            KeyCode::NumpadDivide => KeyId::KeypadDivide,
            KeyCode::NumpadMultiply => KeyId::KeypadMultiply,
            KeyCode::NumpadSubtract => KeyId::KeypadSubtract,
            KeyCode::NumpadAdd => KeyId::KeypadAdd,
            KeyCode::NumpadEnter => KeyId::KeypadEnter,
            KeyCode::NumpadEqual => KeyId::KeypadEquals,
            KeyCode::Space => KeyId::Space,
            KeyCode::Backspace => KeyId::Backspace,
            KeyCode::Tab => KeyId::Tab,
            KeyCode::NumpadClear => KeyId::Clear,
            KeyCode::Enter => KeyId::Return,
            KeyCode::Pause => KeyId::Pause,
            KeyCode::Escape => KeyId::Escape,
            KeyCode::Backquote => KeyId::BackQuote,
            KeyCode::Delete => KeyId::Delete,
            KeyCode::ArrowUp => KeyId::UpArrow,
            KeyCode::ArrowDown => KeyId::DownArrow,
            KeyCode::ArrowRight => KeyId::RightArrow,
            KeyCode::ArrowLeft => KeyId::LeftArrow,
            KeyCode::Insert => KeyId::Insert,
            KeyCode::Home => KeyId::Home,
            KeyCode::End => KeyId::End,
            KeyCode::PageUp => KeyId::PageUp,
            KeyCode::PageDown => KeyId::PageDown,
            KeyCode::F1 => KeyId::F1,
            KeyCode::F2 => KeyId::F2,
            KeyCode::F3 => KeyId::F3,
            KeyCode::F4 => KeyId::F4,
            KeyCode::F5 => KeyId::F5,
            KeyCode::F6 => KeyId::F6,
            KeyCode::F7 => KeyId::F7,
            KeyCode::F8 => KeyId::F8,
            KeyCode::F9 => KeyId::F9,
            KeyCode::F10 => KeyId::F10,
            KeyCode::F11 => KeyId::F11,
            KeyCode::F12 => KeyId::F12,
            KeyCode::F13 => KeyId::F13,
            KeyCode::F14 => KeyId::F14,
            KeyCode::F15 => KeyId::F15,
            KeyCode::NumLock => KeyId::Numlock,
            KeyCode::CapsLock => KeyId::CapsLock,
            KeyCode::ScrollLock => KeyId::ScrollLock,
            KeyCode::ShiftRight => KeyId::RightShift,
            KeyCode::ShiftLeft => KeyId::LeftShift,
            KeyCode::ControlRight => KeyId::RightControl,
            KeyCode::ControlLeft => KeyId::LeftControl,
            KeyCode::AltRight => KeyId::RightAlt,
            KeyCode::AltLeft => KeyId::LeftAlt,
            KeyCode::SuperRight => KeyId::RightCommand,
            KeyCode::SuperLeft => KeyId::LeftCommand,
            KeyCode::Help => KeyId::Help,
            KeyCode::PrintScreen => KeyId::SysReq,
            KeyCode::ContextMenu => KeyId::Menu,
            _ => return None,
        };
        Some(id)
    }
}

/// Gamepad element identifiers. Codes 101..=108 are synthetic stick directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum GamepadElement {
    LeftTrigger = 4,
    RightTrigger = 5,
    A = 6,
    B = 7,
    X = 8,
    Y = 9,
    LeftBumper = 10,
    RightBumper = 11,
    Back = 12,
    Start = 13,
    LeftStickButton = 14,
    RightStickButton = 15,
    DPadUp = 16,
    DPadRight = 17,
    DPadDown = 18,
    DPadLeft = 19,
    LeftStickUp = 101,
    LeftStickDown = 102,
    LeftStickLeft = 103,
    LeftStickRight = 104,
    RightStickUp = 105,
    RightStickDown = 106,
    RightStickLeft = 107,
    RightStickRight = 108,
}

const ALL_ELEMENTS: [GamepadElement; 24] = [
    GamepadElement::LeftTrigger,
    GamepadElement::RightTrigger,
    GamepadElement::A,
    GamepadElement::B,
    GamepadElement::X,
    GamepadElement::Y,
    GamepadElement::LeftBumper,
    GamepadElement::RightBumper,
    GamepadElement::Back,
    GamepadElement::Start,
    GamepadElement::LeftStickButton,
    GamepadElement::RightStickButton,
    GamepadElement::DPadUp,
    GamepadElement::DPadRight,
    GamepadElement::DPadDown,
    GamepadElement::DPadLeft,
    GamepadElement::LeftStickUp,
    GamepadElement::LeftStickDown,
    GamepadElement::LeftStickLeft,
    GamepadElement::LeftStickRight,
    GamepadElement::RightStickUp,
    GamepadElement::RightStickDown,
    GamepadElement::RightStickLeft,
    GamepadElement::RightStickRight,
];

impl GamepadElement {
    /// Raw trigger code of this element
    pub fn code(self) -> TriggerCode {
        self as TriggerCode
    }

    /// Look up an element by its raw trigger code
    pub fn from_code(code: TriggerCode) -> Option<Self> {
        ALL_ELEMENTS.iter().copied().find(|el| el.code() == code)
    }

    /// Stick and direction for the synthetic stick codes
    pub fn stick_direction(self) -> Option<(Stick, StickDirection)> {
        use GamepadElement::*;
        let pair = match self {
            LeftStickUp => (Stick::Left, StickDirection::Up),
            LeftStickDown => (Stick::Left, StickDirection::Down),
            LeftStickLeft => (Stick::Left, StickDirection::Left),
            LeftStickRight => (Stick::Left, StickDirection::Right),
            RightStickUp => (Stick::Right, StickDirection::Up),
            RightStickDown => (Stick::Right, StickDirection::Down),
            RightStickLeft => (Stick::Right, StickDirection::Left),
            RightStickRight => (Stick::Right, StickDirection::Right),
            _ => return None,
        };
        Some(pair)
    }
}
