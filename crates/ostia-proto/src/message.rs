//! DNS message representation.
//!
//! A DNS message is a header followed by four sections: questions, answers,
//! authority records, and additional records.

use crate::error::Result;
use crate::header::{Header, HEADER_SIZE};
use crate::question::Question;
use crate::record::ResourceRecord;
use crate::wire::WireReader;
use bytes::{Bytes, BytesMut};
use rand::Rng;
use std::fmt;
use std::net::Ipv4Addr;

/// A complete DNS message.
///
/// Built incrementally on encode; on decode, the sections are read in
/// header, questions, answers, authority, additional order, driven by the
/// header's own counts. When serializing, the counts are recomputed from
/// the sections actually present - they cannot disagree with the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// The message header.
    header: Header,
    /// The question section.
    questions: Vec<Question>,
    /// The answer section.
    answers: Vec<ResourceRecord>,
    /// The authority section.
    authority: Vec<ResourceRecord>,
    /// The additional section.
    additional: Vec<ResourceRecord>,
}

impl Message {
    /// Creates a new empty message with the given header.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            questions: Vec::new(),
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    /// Assembles a query message for the given question.
    ///
    /// The transaction ID is drawn from the thread RNG across the full
    /// 16-bit space; the question count is 1 and the recursion-desired
    /// flag is set, everything else zero.
    pub fn query(question: Question) -> Self {
        Self::query_with_rng(question, &mut rand::thread_rng())
    }

    /// Assembles a query message drawing the transaction ID from the given
    /// RNG, so tests can pin it.
    pub fn query_with_rng<R: Rng + ?Sized>(question: Question, rng: &mut R) -> Self {
        let mut header = Header::query_with_rng(rng);
        header.qd_count = 1;

        Self {
            header,
            questions: vec![question],
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    /// Returns the message header.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns a mutable reference to the header.
    #[inline]
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the transaction ID.
    #[inline]
    pub fn id(&self) -> u16 {
        self.header.id
    }

    /// Returns the response code.
    #[inline]
    pub fn rcode(&self) -> crate::ResponseCode {
        self.header.rcode
    }

    /// Returns true if this is a response.
    #[inline]
    pub fn is_response(&self) -> bool {
        self.header.is_response()
    }

    /// Returns the question section.
    #[inline]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the first question if present.
    #[inline]
    pub fn question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Returns the answer section.
    #[inline]
    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answers
    }

    /// Returns the authority section.
    #[inline]
    pub fn authority(&self) -> &[ResourceRecord] {
        &self.authority
    }

    /// Returns the additional section.
    #[inline]
    pub fn additional(&self) -> &[ResourceRecord] {
        &self.additional
    }

    /// Returns IPv4 addresses from A records in the answer section.
    pub fn a_records(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.answers.iter().filter_map(|r| r.rdata().as_a())
    }

    /// Adds a question, keeping the header count in step.
    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
        self.header.qd_count = self.questions.len() as u16;
    }

    /// Adds an answer record, keeping the header count in step.
    pub fn add_answer(&mut self, record: ResourceRecord) {
        self.answers.push(record);
        self.header.an_count = self.answers.len() as u16;
    }

    /// Adds an authority record, keeping the header count in step.
    pub fn add_authority(&mut self, record: ResourceRecord) {
        self.authority.push(record);
        self.header.ns_count = self.authority.len() as u16;
    }

    /// Adds an additional record, keeping the header count in step.
    pub fn add_additional(&mut self, record: ResourceRecord) {
        self.additional.push(record);
        self.header.ar_count = self.additional.len() as u16;
    }

    /// Parses a DNS message from wire format.
    ///
    /// Reads header, questions, answers, authority, and additional sections
    /// in order, with the section sizes taken from the header counts. Any
    /// shortage or malformed name fails the whole message; partially
    /// decoded sections are never returned.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let header = Header::parse(data)?;

        let mut reader = WireReader::new(data);
        reader.advance(HEADER_SIZE)?;

        let mut questions = Vec::with_capacity(header.qd_count as usize);
        for _ in 0..header.qd_count {
            questions.push(Question::parse(&mut reader)?);
        }

        let mut answers = Vec::with_capacity(header.an_count as usize);
        for _ in 0..header.an_count {
            answers.push(ResourceRecord::parse(&mut reader)?);
        }

        let mut authority = Vec::with_capacity(header.ns_count as usize);
        for _ in 0..header.ns_count {
            authority.push(ResourceRecord::parse(&mut reader)?);
        }

        let mut additional = Vec::with_capacity(header.ar_count as usize);
        for _ in 0..header.ar_count {
            additional.push(ResourceRecord::parse(&mut reader)?);
        }

        Ok(Self {
            header,
            questions,
            answers,
            authority,
            additional,
        })
    }

    /// Returns the wire format length of this message.
    pub fn wire_len(&self) -> usize {
        let mut len = HEADER_SIZE;

        for q in &self.questions {
            len += q.wire_len();
        }
        for r in self
            .answers
            .iter()
            .chain(&self.authority)
            .chain(&self.additional)
        {
            len += r.wire_len();
        }

        len
    }

    /// Writes the message to wire format.
    ///
    /// The header counts are recomputed from the sections being written.
    pub fn write_to(&self, buf: &mut BytesMut) {
        let mut header = self.header.clone();
        header.qd_count = self.questions.len() as u16;
        header.an_count = self.answers.len() as u16;
        header.ns_count = self.authority.len() as u16;
        header.ar_count = self.additional.len() as u16;

        header.write_to(buf);

        for q in &self.questions {
            q.write_to(buf);
        }
        for r in self
            .answers
            .iter()
            .chain(&self.authority)
            .chain(&self.additional)
        {
            r.write_to(buf);
        }
    }

    /// Converts the message to wire format bytes.
    pub fn to_wire(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.write_to(&mut buf);
        buf.freeze()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ";; {}", self.header)?;
        for q in &self.questions {
            writeln!(f, ";{q}")?;
        }
        for r in &self.answers {
            writeln!(f, "{r}")?;
        }
        for r in &self.authority {
            writeln!(f, "{r}")?;
        }
        for r in &self.additional {
            writeln!(f, "{r}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::header::HeaderFlags;
    use rand::rngs::mock::StepRng;
    use std::collections::HashSet;

    fn example_query() -> Message {
        Message::query(Question::a("example.com".parse().unwrap()))
    }

    #[test]
    fn test_query_assembly() {
        let query = example_query();

        assert!(query.header().is_query());
        assert!(query.header().recursion_desired());
        assert_eq!(query.header().qd_count, 1);
        assert_eq!(query.questions().len(), 1);
        assert!(query.answers().is_empty());
    }

    #[test]
    fn test_query_exact_byte_count() {
        // 12-byte header + 13-byte name + 2-byte type + 2-byte class
        let query = example_query();
        let wire = query.to_wire();
        assert_eq!(wire.len(), 29);
        assert_eq!(query.wire_len(), 29);
    }

    #[test]
    fn test_query_ids_vary() {
        let ids: HashSet<u16> = (0..1000).map(|_| example_query().id()).collect();
        assert!(ids.len() >= 2, "1000 queries produced {} distinct IDs", ids.len());
    }

    #[test]
    fn test_query_with_pinned_rng() {
        let mut rng = StepRng::new(0x1314, 0);
        let query = Message::query_with_rng(Question::a("example.com".parse().unwrap()), &mut rng);
        assert_eq!(query.id(), 0x1314);

        let wire = query.to_wire();
        assert_eq!(&wire[..2], &[0x13, 0x14]);
        assert_eq!(&wire[2..4], &[0x01, 0x00]); // RD only
        assert_eq!(&wire[4..6], &[0x00, 0x01]); // QDCOUNT 1
    }

    #[test]
    fn test_counts_follow_sections() {
        let mut message = Message::new(Header::new(7));
        assert_eq!(message.header().qd_count, 0);

        message.add_question(Question::a("example.com".parse().unwrap()));
        message.add_answer(ResourceRecord::a(
            "example.com".parse().unwrap(),
            60,
            Ipv4Addr::new(192, 0, 2, 1),
        ));
        message.add_answer(ResourceRecord::a(
            "example.com".parse().unwrap(),
            60,
            Ipv4Addr::new(192, 0, 2, 2),
        ));

        assert_eq!(message.header().qd_count, 1);
        assert_eq!(message.header().an_count, 2);

        // A tampered count is overwritten at serialization time
        message.header_mut().an_count = 40;
        let reparsed = Message::parse(&message.to_wire()).unwrap();
        assert_eq!(reparsed.header().an_count, 2);
        assert_eq!(reparsed.answers().len(), 2);
    }

    #[test]
    fn test_message_roundtrip() {
        let mut response = Message::new(Header::new(0x5555));
        response.header_mut().flags = HeaderFlags::QR | HeaderFlags::RD | HeaderFlags::RA;
        response.add_question(Question::a("example.com".parse().unwrap()));
        response.add_answer(ResourceRecord::a(
            "example.com".parse().unwrap(),
            300,
            Ipv4Addr::new(93, 184, 216, 34),
        ));
        response.add_authority(ResourceRecord::a(
            "ns.example.com".parse().unwrap(),
            86400,
            Ipv4Addr::new(192, 0, 2, 53),
        ));

        let parsed = Message::parse(&response.to_wire()).unwrap();
        assert_eq!(parsed, response);
        assert_eq!(parsed.a_records().collect::<Vec<_>>(), vec![Ipv4Addr::new(93, 184, 216, 34)]);
        assert_eq!(parsed.authority().len(), 1);
    }

    #[test]
    fn test_parse_counts_exceed_content() {
        // Header promises one answer but the buffer ends after the question
        let query = example_query();
        let mut wire = BytesMut::from(query.to_wire().as_ref());
        wire[6] = 0x00;
        wire[7] = 0x01; // ANCOUNT = 1

        assert!(matches!(
            Message::parse(&wire),
            Err(Error::TruncatedName { .. })
        ));
    }

    #[test]
    fn test_parse_query_roundtrip() {
        let mut rng = StepRng::new(42, 0);
        let query = Message::query_with_rng(Question::a("www.example.com".parse().unwrap()), &mut rng);

        let parsed = Message::parse(&query.to_wire()).unwrap();
        assert_eq!(parsed, query);
        assert_eq!(parsed.question().unwrap().qname.to_string(), "www.example.com.");
    }
}
