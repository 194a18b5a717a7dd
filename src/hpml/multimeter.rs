// src/hpml/multimeter.rs

use alloc::string::{String, ToString};
use core::fmt::Debug;

use super::catalog::{
    unit_for, InputRange, Mode, OutputFormat, RangePreset, ToggleMode, TriggerMode,
};
use super::command::{Command, Keyword};
use super::parse::{parse_number, ReplySplit};
use super::profile::{Dialect, InitStep, Profile};
use crate::common::{
    hal_traits::TransportExt, CatalogVariant, CodeTable, Encoding, InstrumentError, Quantity,
    Reading, Transport,
};

type Result<T, E> = core::result::Result<T, InstrumentError<E>>;

/// A settable/queryable parameter whose values come from a code table.
///
/// Writing sends `KEYWORD code`; reading sends `KEYWORD?` and decodes the
/// leading token of the reply.
#[derive(Debug, Copy, Clone)]
pub struct CodedField<V: 'static> {
    pub keyword: Keyword,
    pub table: &'static CodeTable<V>,
}

impl<V: CatalogVariant> CodedField<V> {
    pub const fn new(keyword: Keyword, table: &'static CodeTable<V>) -> Self {
        Self { keyword, table }
    }

    /// Encodes `value` and issues exactly one write. Nothing is sent if the
    /// table has no code for `value`.
    pub fn write<T: Transport>(&self, io: &mut T, value: V) -> Result<(), T::Error> {
        let code = self.table.encode::<T::Error>(value)?;
        io.send_line(&Command::Set { keyword: self.keyword, code }.to_string())
    }

    /// Issues exactly one query and decodes the leading token of the reply.
    pub fn read<T: Transport>(&self, io: &mut T, split: ReplySplit) -> Result<V, T::Error> {
        let reply = io.ask(&Command::Query(self.keyword).to_string())?;
        self.table.decode(split.leading(&reply))
    }
}

/// Driver for instruments speaking the HP Multimeter Language.
///
/// Holds no device state except the output format it last configured, which
/// fixes the width of readings returned by [`measure`](Self::measure).
#[derive(Debug)]
pub struct HpmlMultimeter<T: Transport> {
    transport: T,
    profile: &'static Profile,
    output_format: OutputFormat,
}

impl<T> HpmlMultimeter<T>
where
    T: Transport,
    T::Error: Debug,
{
    /// Takes ownership of `transport` and applies the profile's
    /// initialization sequence, in order. The first failing step aborts.
    pub fn open(transport: T, profile: &'static Profile) -> Result<Self, T::Error> {
        let mut dmm = HpmlMultimeter {
            transport,
            profile,
            output_format: profile.power_on_format,
        };
        log::debug!("initializing {} ({} steps)", profile.model, profile.init.len());
        for step in profile.init {
            dmm.apply(step)?;
        }
        Ok(dmm)
    }

    fn apply(&mut self, step: &InitStep) -> Result<(), T::Error> {
        match *step {
            InitStep::TriggerArm(mode) => self.set_tarm_mode(mode),
            InitStep::TriggerEvent(mode) => self.set_trigger_mode(mode),
            InitStep::MemoryFormat(format) => self.set_memory_format(format),
            InitStep::OutputFormat(format) => self.set_output_format(format),
            InitStep::Display(state) => self.set_display(state),
            InitStep::Autozero(state) => self.set_autozero(state),
            InitStep::Range(range) => self.set_input_range(range),
            InitStep::Terminator(terminator) => {
                self.transport.set_terminator(terminator);
                Ok(())
            }
        }
    }

    pub fn profile(&self) -> &'static Profile {
        self.profile
    }

    fn dialect(&self) -> &'static Dialect {
        &self.profile.dialect
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Releases the transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    fn send(&mut self, command: &Command) -> Result<(), T::Error> {
        self.transport.send_line(&command.to_string())
    }

    // --- Properties ---

    /// Current measurement function (`FUNC?`).
    pub fn mode(&mut self) -> Result<Mode, T::Error> {
        let d = self.dialect();
        CodedField::new(Keyword::Func, d.mode_codes).read(&mut self.transport, d.reply_split)
    }

    /// Switches the measurement function. Fails with `InvalidMode` before
    /// sending anything if this model has no code for `mode`.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), T::Error> {
        CodedField::new(Keyword::Func, self.dialect().mode_codes).write(&mut self.transport, mode)
    }

    /// Trigger event source (`TRIG?`).
    pub fn trigger_mode(&mut self) -> Result<TriggerMode, T::Error> {
        let d = self.dialect();
        CodedField::new(Keyword::Trig, d.trigger_codes).read(&mut self.transport, d.reply_split)
    }

    pub fn set_trigger_mode(&mut self, mode: TriggerMode) -> Result<(), T::Error> {
        CodedField::new(Keyword::Trig, self.dialect().trigger_codes).write(&mut self.transport, mode)
    }

    /// Trigger arm source (`TARM?`).
    pub fn tarm_mode(&mut self) -> Result<TriggerMode, T::Error> {
        let d = self.dialect();
        CodedField::new(Keyword::Tarm, d.trigger_codes).read(&mut self.transport, d.reply_split)
    }

    pub fn set_tarm_mode(&mut self, mode: TriggerMode) -> Result<(), T::Error> {
        CodedField::new(Keyword::Tarm, self.dialect().trigger_codes).write(&mut self.transport, mode)
    }

    /// GPIB output format as reported by the instrument (`OFORMAT?`).
    pub fn output_format(&mut self) -> Result<OutputFormat, T::Error> {
        let d = self.dialect();
        CodedField::new(Keyword::Oformat, d.format_codes).read(&mut self.transport, d.reply_split)
    }

    /// Sets the GPIB output format and records it as the width used by
    /// `measure`. The record only changes once the write succeeded.
    pub fn set_output_format(&mut self, format: OutputFormat) -> Result<(), T::Error> {
        CodedField::new(Keyword::Oformat, self.dialect().format_codes)
            .write(&mut self.transport, format)?;
        self.output_format = format;
        Ok(())
    }

    /// The output format this driver last configured.
    pub fn configured_output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Reading memory format (`MFORMAT?`).
    pub fn memory_format(&mut self) -> Result<OutputFormat, T::Error> {
        let d = self.dialect();
        CodedField::new(Keyword::Mformat, d.format_codes).read(&mut self.transport, d.reply_split)
    }

    pub fn set_memory_format(&mut self, format: OutputFormat) -> Result<(), T::Error> {
        CodedField::new(Keyword::Mformat, self.dialect().format_codes)
            .write(&mut self.transport, format)
    }

    /// Front panel display state (`DISP?`).
    pub fn display(&mut self) -> Result<ToggleMode, T::Error> {
        let d = self.dialect();
        CodedField::new(Keyword::Disp, d.toggle_codes).read(&mut self.transport, d.reply_split)
    }

    pub fn set_display(&mut self, state: ToggleMode) -> Result<(), T::Error> {
        CodedField::new(Keyword::Disp, self.dialect().toggle_codes).write(&mut self.transport, state)
    }

    /// Autozero state (`AZERO?`).
    pub fn autozero(&mut self) -> Result<ToggleMode, T::Error> {
        let d = self.dialect();
        CodedField::new(Keyword::Azero, d.toggle_codes).read(&mut self.transport, d.reply_split)
    }

    pub fn set_autozero(&mut self, state: ToggleMode) -> Result<(), T::Error> {
        CodedField::new(Keyword::Azero, self.dialect().toggle_codes).write(&mut self.transport, state)
    }

    /// Input range of the active function.
    ///
    /// Read from the compound `FUNC?` reply (`"<function>, <range>"`) with a
    /// single query. The range is tagged with the function's unit, or
    /// returned bare for functions that have none.
    pub fn input_range(&mut self) -> Result<InputRange, T::Error> {
        let d = self.dialect();
        if !d.supports_input_range {
            return Err(InstrumentError::NotSupported("input_range"));
        }
        let reply = self.transport.ask(&Command::Query(Keyword::Func).to_string())?;
        let mode = d.mode_codes.decode::<T::Error>(d.reply_split.leading(&reply))?;
        let token = d
            .reply_split
            .field(&reply, 1)
            .ok_or_else(|| InstrumentError::InvalidResponse(reply.clone()))?;
        match parse_number(token) {
            Some(value) => Ok(match unit_for::<T::Error>(mode) {
                Ok(unit) => InputRange::Value(Quantity::new(value, unit)),
                Err(_) => InputRange::Bare(value),
            }),
            None => d.range_codes.decode(token).map(InputRange::Preset),
        }
    }

    /// Sets the input range.
    ///
    /// A preset is sent as its code and a bare number as is. A quantity is
    /// rescaled to the unit of the active function, which costs one `FUNC?`
    /// query before the write; functions without a unit take its magnitude
    /// unscaled.
    pub fn set_input_range(&mut self, range: impl Into<InputRange>) -> Result<(), T::Error> {
        let d = self.dialect();
        if !d.supports_input_range {
            return Err(InstrumentError::NotSupported("input_range"));
        }
        match range.into() {
            InputRange::Preset(preset) => self.send_range_preset(preset),
            InputRange::Bare(value) => self.send(&Command::SetValue { keyword: Keyword::Range, value }),
            InputRange::Value(quantity) => {
                let mode = self.mode()?;
                let value = match unit_for::<T::Error>(mode) {
                    Ok(unit) => quantity.rescale(unit)?,
                    Err(_) => {
                        log::warn!("no unit defined for {:?}, sending range {} unscaled", mode, quantity);
                        quantity.value()
                    }
                };
                self.send(&Command::SetValue { keyword: Keyword::Range, value })
            }
        }
    }

    fn send_range_preset(&mut self, preset: RangePreset) -> Result<(), T::Error> {
        let code = self.dialect().range_codes.encode::<T::Error>(preset)?;
        self.send(&Command::Set { keyword: Keyword::Range, code })
    }

    /// Relative (null) measurements are not exposed by any HPML profile.
    pub fn relative(&mut self) -> Result<bool, T::Error> {
        Err(InstrumentError::NotSupported("relative"))
    }

    pub fn set_relative(&mut self, _enabled: bool) -> Result<(), T::Error> {
        Err(InstrumentError::NotSupported("relative"))
    }

    /// Identification string (`ID?`), trimmed.
    pub fn name(&mut self) -> Result<String, T::Error> {
        let reply = self.transport.ask(&Command::Identify.to_string())?;
        Ok(reply.trim().to_string())
    }

    /// Runs the self test; `true` if the instrument reports no error.
    pub fn self_test_ok(&mut self) -> Result<bool, T::Error> {
        let query = self.dialect().self_test_query;
        let reply = self.transport.ask(query)?;
        match reply.trim().parse::<i32>() {
            Ok(code) => Ok(code == 0),
            Err(_) => Err(InstrumentError::InvalidResponse(reply)),
        }
    }

    // --- Basic Commands ---

    /// Returns the instrument to its power-on state without cycling power.
    /// Completion is not verified.
    pub fn reset(&mut self) -> Result<(), T::Error> {
        self.send(&Command::Reset)
    }

    /// Clears the instrument's buffers.
    pub fn clear(&mut self) -> Result<(), T::Error> {
        self.send(&Command::Clear)
    }

    /// Sends one software trigger.
    ///
    /// Only meaningful while the trigger source is `Single` or
    /// `Synchronous`; in any other state the line is still sent and the
    /// instrument decides what happens.
    pub fn trigger(&mut self) -> Result<(), T::Error> {
        self.send(&Command::Literal(self.dialect().software_trigger))
    }

    /// Takes one reading.
    ///
    /// With `Some(mode)` the function is always switched explicitly first
    /// (one `FUNC` write), whatever the instrument is currently set to; a mode
    /// this model has no code for fails with `InvalidMode` before anything is
    /// sent. With `None` the current function is queried to pick the unit.
    ///
    /// The reading is decoded with the configured output format and tagged
    /// with the mode's unit, or returned bare if the mode has none.
    pub fn measure(&mut self, mode: Option<Mode>) -> Result<Reading, T::Error> {
        let mode = match mode {
            Some(mode) => {
                self.set_mode(mode)?;
                mode
            }
            None => self.mode()?,
        };
        self.trigger()?;
        let value = self.read(self.output_format.encoding())?;
        match unit_for::<T::Error>(mode) {
            Ok(unit) => Ok(Reading::with_unit(value, unit)),
            Err(_) => {
                log::warn!("no unit defined for {:?}, returning bare reading", mode);
                Ok(Reading::bare(value))
            }
        }
    }

    /// Reads and decodes one reading in `encoding`: a terminated line for
    /// ASCII, exactly the encoding's width for binary formats.
    pub fn read(&mut self, encoding: Encoding) -> Result<f64, T::Error> {
        let raw = self.transport.read_raw(encoding.size_in_bytes())?;
        encoding
            .decode(&raw, self.dialect().byte_order)
            .map_err(|e| InstrumentError::from_decode(e, &raw))
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::mock::{Event, MockIoError, RecordingTransport};
    use crate::common::Unit;
    use crate::hpml::profile::GENERIC_HPML;

    fn generic(io: RecordingTransport) -> HpmlMultimeter<RecordingTransport> {
        HpmlMultimeter::open(io, &GENERIC_HPML).unwrap()
    }

    #[test]
    fn test_generic_profile_sends_nothing_on_open() {
        let dmm = generic(RecordingTransport::new());
        assert!(dmm.transport().events.is_empty());
        assert_eq!(dmm.configured_output_format(), OutputFormat::Ascii);
    }

    #[test]
    fn test_mode_round_trip() {
        let mut dmm = generic(RecordingTransport::new().reply("7"));
        dmm.set_mode(Mode::CurrentAc).unwrap();
        assert_eq!(dmm.mode().unwrap(), Mode::CurrentAc);
        assert_eq!(dmm.transport().lines(), ["FUNC 7", "FUNC?"]);
    }

    #[test]
    fn test_compound_mode_reply_uses_leading_token() {
        let mut dmm = generic(RecordingTransport::new().reply("6, 1.0E-4"));
        assert_eq!(dmm.mode().unwrap(), Mode::CurrentDc);
    }

    #[test]
    fn test_unrecognized_mode_code_is_an_error() {
        let mut dmm = generic(RecordingTransport::new().reply("42, 1"));
        let err = dmm.mode().unwrap_err();
        assert!(matches!(
            err,
            InstrumentError::UnrecognizedCode { ref raw, expected: "Mode" } if raw == "42"
        ));
    }

    #[test]
    fn test_trigger_mode_string_codes() {
        let mut dmm = generic(RecordingTransport::new().reply("AUTO, 0"));
        dmm.set_trigger_mode(TriggerMode::External).unwrap();
        assert_eq!(dmm.trigger_mode().unwrap(), TriggerMode::Auto);
        assert_eq!(dmm.transport().lines(), ["TRIG EXT", "TRIG?"]);
    }

    #[test]
    fn test_tarm_and_format_fields() {
        let mut dmm = generic(RecordingTransport::new().reply("SYN").reply("5"));
        dmm.set_tarm_mode(TriggerMode::Hold).unwrap();
        dmm.set_memory_format(OutputFormat::Sreal).unwrap();
        dmm.set_display(ToggleMode::Off).unwrap();
        dmm.set_autozero(ToggleMode::On).unwrap();
        assert_eq!(dmm.tarm_mode().unwrap(), TriggerMode::Synchronous);
        assert_eq!(dmm.memory_format().unwrap(), OutputFormat::Dreal);
        assert_eq!(
            dmm.transport().lines(),
            ["TARM HOLD", "MFORMAT 4", "DISP 0", "AZERO 1", "TARM?", "MFORMAT?"]
        );
    }

    #[test]
    fn test_set_output_format_tracks_width() {
        let mut dmm = generic(RecordingTransport::new().reply("4"));
        dmm.set_output_format(OutputFormat::Sreal).unwrap();
        assert_eq!(dmm.configured_output_format(), OutputFormat::Sreal);
        assert_eq!(dmm.output_format().unwrap(), OutputFormat::Sreal);
        assert_eq!(dmm.transport().lines(), ["OFORMAT 4", "OFORMAT?"]);
    }

    #[test]
    fn test_failed_output_format_write_keeps_old_width() {
        let mut dmm = generic(RecordingTransport::new().failing());
        let err = dmm.set_output_format(OutputFormat::Dreal).unwrap_err();
        assert!(matches!(err, InstrumentError::Transport(MockIoError)));
        assert_eq!(dmm.configured_output_format(), OutputFormat::Ascii);
    }

    #[test]
    fn test_toggle_reads() {
        let mut dmm = generic(RecordingTransport::new().reply("1").reply("0"));
        assert_eq!(dmm.display().unwrap(), ToggleMode::On);
        assert_eq!(dmm.autozero().unwrap(), ToggleMode::Off);
    }

    #[test]
    fn test_basic_commands() {
        let mut dmm = generic(RecordingTransport::new());
        dmm.reset().unwrap();
        dmm.clear().unwrap();
        dmm.trigger().unwrap();
        assert_eq!(dmm.transport().lines(), ["RESET", "CLEAR", "TRIG SGL"]);
    }

    #[test]
    fn test_name_and_self_test() {
        let mut dmm = generic(RecordingTransport::new().reply("HP3458A\r").reply("0").reply("+4"));
        assert_eq!(dmm.name().unwrap(), "HP3458A");
        assert!(dmm.self_test_ok().unwrap());
        assert!(!dmm.self_test_ok().unwrap());
        assert_eq!(dmm.transport().lines(), ["ID?", "TEST;ERR?", "TEST;ERR?"]);
    }

    #[test]
    fn test_self_test_malformed_reply() {
        let mut dmm = generic(RecordingTransport::new().reply("PASS"));
        assert!(matches!(
            dmm.self_test_ok(),
            Err(InstrumentError::InvalidResponse(ref s)) if s == "PASS"
        ));
    }

    #[test]
    fn test_transport_errors_propagate_unchanged() {
        let mut dmm = generic(RecordingTransport::new().failing());
        assert!(matches!(dmm.name(), Err(InstrumentError::Transport(MockIoError))));
    }

    #[test]
    fn test_relative_and_range_not_supported_on_generic() {
        let mut dmm = generic(RecordingTransport::new());
        assert!(matches!(dmm.relative(), Err(InstrumentError::NotSupported("relative"))));
        assert!(matches!(dmm.set_relative(true), Err(InstrumentError::NotSupported("relative"))));
        assert!(matches!(dmm.input_range(), Err(InstrumentError::NotSupported("input_range"))));
        assert!(matches!(
            dmm.set_input_range(RangePreset::Automatic),
            Err(InstrumentError::NotSupported("input_range"))
        ));
        assert_eq!(dmm.transport().writes(), 0);
    }

    #[test]
    fn test_measure_with_mode_switches_then_triggers() {
        let mut dmm = generic(RecordingTransport::new().payload(b"-1.250000E+00"));
        let reading = dmm.measure(Some(Mode::VoltageDc)).unwrap();
        assert_eq!(reading, Reading::with_unit(-1.25, Unit::Volt));
        assert_eq!(
            dmm.transport().events,
            [
                Event::Send("FUNC 1".into()),
                Event::Send("TRIG SGL".into()),
                Event::Read(None),
            ]
        );
    }

    #[test]
    fn test_measure_without_mode_queries_current_mode() {
        let mut dmm = generic(RecordingTransport::new().reply("9, 1.0E+3").payload(b"50.0"));
        let reading = dmm.measure(None).unwrap();
        assert_eq!(reading.unit, Some(Unit::Hertz));
        assert_eq!(dmm.transport().lines(), ["FUNC?", "TRIG SGL"]);
    }

    #[test]
    fn test_measure_unitless_mode_returns_bare_value() {
        let mut dmm = generic(RecordingTransport::new().payload(b"0.5"));
        let reading = dmm.measure(Some(Mode::DirectSamplingDc)).unwrap();
        assert_eq!(reading, Reading::bare(0.5));
    }

    #[test]
    fn test_measure_unparsable_ascii_reading() {
        let mut dmm = generic(RecordingTransport::new().payload(b"OVLD"));
        assert!(matches!(
            dmm.measure(Some(Mode::Resistance)),
            Err(InstrumentError::InvalidResponse(ref s)) if s == "OVLD"
        ));
    }

    #[test]
    fn test_read_binary_uses_encoding_width() {
        let mut dmm = generic(RecordingTransport::new().payload(&2.5_f32.to_be_bytes()));
        assert_eq!(dmm.read(Encoding::Ieee754_32).unwrap(), 2.5);
        assert_eq!(dmm.transport().events, [Event::Read(Some(4))]);
    }

    #[test]
    fn test_coded_field_rejects_before_sending() {
        static ONLY_DC: CodeTable<Mode> =
            CodeTable::new(&[(Mode::VoltageDc, crate::common::WireCode::Int(1))]);
        let field = CodedField::new(Keyword::Func, &ONLY_DC);
        let mut io = RecordingTransport::new();
        assert!(matches!(
            field.write(&mut io, Mode::Period),
            Err(InstrumentError::InvalidMode(Mode::Period))
        ));
        assert_eq!(io.writes(), 0);
    }

    #[test]
    fn test_measure_mode_without_code_sends_nothing() {
        use crate::common::{ByteOrder, WireCode};
        use crate::hpml::catalog::{FORMAT_CODES, RANGE_PRESET_CODES, TOGGLE_CODES, TRIGGER_CODES};

        static DC_ONLY: CodeTable<Mode> = CodeTable::new(&[(Mode::VoltageDc, WireCode::Int(1))]);
        static DC_ONLY_METER: Profile = Profile {
            model: "DC-only meter",
            dialect: Dialect {
                mode_codes: &DC_ONLY,
                trigger_codes: &TRIGGER_CODES,
                format_codes: &FORMAT_CODES,
                toggle_codes: &TOGGLE_CODES,
                range_codes: &RANGE_PRESET_CODES,
                reply_split: ReplySplit::Comma,
                software_trigger: "TRIG SGL",
                self_test_query: "TEST;ERR?",
                byte_order: ByteOrder::Big,
                supports_input_range: false,
            },
            power_on_format: OutputFormat::Ascii,
            init: &[],
        };

        let mut dmm = HpmlMultimeter::open(RecordingTransport::new(), &DC_ONLY_METER).unwrap();
        assert!(matches!(
            dmm.measure(Some(Mode::Frequency)),
            Err(InstrumentError::InvalidMode(Mode::Frequency))
        ));
        assert!(matches!(
            dmm.set_mode(Mode::CurrentAc),
            Err(InstrumentError::InvalidMode(Mode::CurrentAc))
        ));
        assert_eq!(dmm.transport().writes(), 0);
    }
}
