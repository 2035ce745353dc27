use xml::writer::XmlEvent;
use xml::{EmitterConfig, EventWriter};

use crate::Result;

use super::Utterance;

const SSML_NAMESPACE: &str = "http://www.w3.org/2001/10/synthesis";

impl Utterance {
    /// Renders this utterance as an SSML document, for engines that accept markup instead of
    /// separate speech parameters.
    ///
    /// The voice is referenced by name. Rate and pitch are expressed relative to the voice's
    /// normal values, and volume on the 0 to 100 scale.
    pub fn to_ssml(&self) -> Result<String> {
        let mut writer = EventWriter::new_with_config(
            Vec::new(),
            EmitterConfig::new().write_document_declaration(false),
        );

        writer.write(
            XmlEvent::start_element("speak")
                .default_ns(SSML_NAMESPACE)
                .attr("version", "1.0")
                .attr("xml:lang", &self.language),
        )?;
        if let Some(voice) = self.voice.as_ref() {
            writer.write(XmlEvent::start_element("voice").attr("name", voice.name()))?;
        }

        let rate = format!("{:.0}%", self.rate.value() * 100.0);
        let pitch = format!("{:+.0}%", (self.pitch.value() - 1.0) * 100.0);
        let volume = format!("{:.0}", self.volume.value() * 100.0);
        writer.write(
            XmlEvent::start_element("prosody")
                .attr("rate", &rate)
                .attr("pitch", &pitch)
                .attr("volume", &volume),
        )?;
        writer.write(self.text.as_str())?;
        writer.write(XmlEvent::end_element())?;

        if self.voice.is_some() {
            writer.write(XmlEvent::end_element())?;
        }
        writer.write(XmlEvent::end_element())?;

        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }
}
