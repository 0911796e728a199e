use music_tag_renamer::identity::Identity;
use music_tag_renamer::tag_io::RawFields;
use music_tag_renamer::track::{ContainerFormat, TrackRecord};

fn raw(entries: &[(&str, &[&str])]) -> RawFields {
    entries
        .iter()
        .map(|(code, values)| {
            (
                code.to_string(),
                values.iter().map(|v| v.to_string()).collect(),
            )
        })
        .collect()
}

fn full_mp3_raw() -> RawFields {
    raw(&[
        ("TPE1", &["John Doe"]),
        ("TPE2", &["Jane Roe"]),
        ("TPE3", &["Alex Poe"]),
        ("TPE4", &["Sam Moe"]),
        ("TIT2", &["Silence"]),
        ("TALB", &["Quod Libet Test Data"]),
        ("TRCK", &["2/12"]),
        ("TPOS", &["1/2"]),
        ("TYER", &["2004"]),
        ("TCON", &["Silence"]),
    ])
}

#[test]
fn mp3_decode_collects_artists_in_alias_order() {
    let record = TrackRecord::decode(ContainerFormat::Mp3, &full_mp3_raw());
    let names: Vec<String> = record.artists.iter().map(|a| a.name()).collect();
    assert_eq!(names, ["John Doe", "Jane Roe", "Alex Poe", "Sam Moe"]);
}

#[test]
fn mp3_decode_suppresses_duplicate_artists() {
    let mut fields = full_mp3_raw();
    fields.insert("TPE4".to_string(), vec!["John Doe".to_string()]);
    let record = TrackRecord::decode(ContainerFormat::Mp3, &fields);
    assert_eq!(record.artists.len(), 3);
    assert_eq!(record.artists[0], Identity::from_display_name("John Doe"));
}

#[test]
fn mp3_decode_skips_empty_artist_text() {
    let mut fields = full_mp3_raw();
    fields.insert("TPE2".to_string(), vec!["   ".to_string()]);
    let record = TrackRecord::decode(ContainerFormat::Mp3, &fields);
    let names: Vec<String> = record.artists.iter().map(|a| a.name()).collect();
    assert_eq!(names, ["John Doe", "Alex Poe", "Sam Moe"]);
}

#[test]
fn mp3_decode_scalars() {
    let record = TrackRecord::decode(ContainerFormat::Mp3, &full_mp3_raw());
    assert_eq!(record.title, "Silence");
    assert_eq!(record.album_title, "Quod Libet Test Data");
    assert_eq!(record.track_number, 2);
    assert_eq!(record.disc_number, 1);
    assert_eq!(record.year, 2004);
    assert_eq!(record.genre, "Silence");
    assert_eq!(record.description, "");
}

#[test]
fn mp3_title_falls_back_to_tit1() {
    let mut fields = full_mp3_raw();
    fields.remove("TIT2");
    fields.insert("TIT1".to_string(), vec!["Grouped Title".to_string()]);
    let record = TrackRecord::decode(ContainerFormat::Mp3, &fields);
    assert_eq!(record.title, "Grouped Title");
}

#[test]
fn mp3_year_falls_back_to_tdrc() {
    let mut fields = full_mp3_raw();
    fields.remove("TYER");
    fields.insert("TDRC".to_string(), vec!["2004-05-01".to_string()]);
    let record = TrackRecord::decode(ContainerFormat::Mp3, &fields);
    assert_eq!(record.year, 2004);
}

#[test]
fn single_disc_sets_do_not_count_as_multi_disc() {
    let mut fields = full_mp3_raw();
    fields.insert("TPOS".to_string(), vec!["1/1".to_string()]);
    let record = TrackRecord::decode(ContainerFormat::Mp3, &fields);
    assert_eq!(record.disc_number, 0);

    fields.insert("TPOS".to_string(), vec!["1".to_string()]);
    let record = TrackRecord::decode(ContainerFormat::Mp3, &fields);
    assert_eq!(record.disc_number, 0);
}

#[test]
fn missing_fields_decode_to_defaults() {
    let record = TrackRecord::decode(ContainerFormat::Mp3, &RawFields::new());
    assert!(record.artists.is_empty());
    assert_eq!(record.title, "");
    assert_eq!(record.album_title, "");
    assert_eq!(record.track_number, 0);
    assert_eq!(record.disc_number, 0);
    assert_eq!(record.year, 0);
    assert_eq!(record.genre, "");
}

#[test]
fn mp3_round_trip_is_stable() {
    let first = TrackRecord::decode(ContainerFormat::Mp3, &full_mp3_raw());
    let second = TrackRecord::decode(ContainerFormat::Mp3, &first.encode());
    assert_eq!(first, second);
}

#[test]
fn mp3_encode_writes_at_most_four_artists() {
    let mut record = TrackRecord::decode(ContainerFormat::Mp3, &full_mp3_raw());
    record.artists.push(Identity::from_display_name("One More"));

    let encoded = record.encode();
    assert_eq!(encoded["TPE1"], vec!["John Doe"]);
    assert_eq!(encoded["TPE4"], vec!["Sam Moe"]);
    assert!(!encoded.contains_key("TPE5"));
}

#[test]
fn mp3_encode_omits_absent_artist_slots() {
    let mut record = TrackRecord::new(ContainerFormat::Mp3);
    record.artists.push(Identity::from_display_name("John Doe"));

    let encoded = record.encode();
    assert!(encoded.contains_key("TPE1"));
    assert!(!encoded.contains_key("TPE2"));
    assert!(!encoded.contains_key("TPE3"));
    assert!(!encoded.contains_key("TPE4"));
}

#[test]
fn mp3_encode_omits_disc_when_zero() {
    let record = TrackRecord::new(ContainerFormat::Mp3);
    assert!(!record.encode().contains_key("TPOS"));
}

#[test]
fn unknown_year_encodes_as_0000_in_both_year_frames() {
    let record = TrackRecord::new(ContainerFormat::Mp3);
    let encoded = record.encode();
    assert_eq!(encoded["TYER"], vec!["0000"]);
    assert_eq!(encoded["TDRC"], vec!["0000"]);
}

#[test]
fn mp3_encode_writes_empty_scalars() {
    let record = TrackRecord::new(ContainerFormat::Mp3);
    let encoded = record.encode();
    assert_eq!(encoded["TIT2"], vec![""]);
    assert_eq!(encoded["TALB"], vec![""]);
    assert_eq!(encoded["TIT3"], vec![""]);
    assert_eq!(encoded["TCON"], vec![""]);
    assert_eq!(encoded["TRCK"], vec!["0"]);
}

fn full_ogg_raw() -> RawFields {
    raw(&[
        ("artist", &["K.D. Lang", "Tony Bennett"]),
        ("title", &["What a Wonderful World"]),
        ("album", &["A Wonderful World"]),
        ("tracknumber", &["5"]),
        ("date", &["2002"]),
        ("genre", &["Vocal"]),
    ])
}

#[test]
fn ogg_decode_collects_all_artist_values() {
    let record = TrackRecord::decode(ContainerFormat::Ogg, &full_ogg_raw());
    assert_eq!(
        record.artists,
        vec![
            Identity::from_display_name("K.D. Lang"),
            Identity::from_display_name("Tony Bennett"),
        ]
    );
    assert_eq!(record.title, "What a Wonderful World");
    assert_eq!(record.album_title, "A Wonderful World");
    assert_eq!(record.track_number, 5);
    assert_eq!(record.disc_number, 0);
    assert_eq!(record.year, 2002);
    assert_eq!(record.genre, "Vocal");
}

#[test]
fn ogg_decode_suppresses_duplicate_artists() {
    let mut fields = full_ogg_raw();
    fields.insert(
        "artist".to_string(),
        vec!["Tony Bennett".to_string(), "Tony Bennett".to_string()],
    );
    let record = TrackRecord::decode(ContainerFormat::Ogg, &fields);
    assert_eq!(record.artists.len(), 1);
}

#[test]
fn ogg_encode_uses_one_multi_value_artist_field() {
    let record = TrackRecord::decode(ContainerFormat::Ogg, &full_ogg_raw());
    let encoded = record.encode();
    assert_eq!(encoded["artist"], vec!["K.D. Lang", "Tony Bennett"]);
    assert_eq!(encoded["date"], vec!["2002"]);
    assert_eq!(encoded["description"], vec![""]);
}

#[test]
fn ogg_round_trip_is_stable() {
    let first = TrackRecord::decode(ContainerFormat::Ogg, &full_ogg_raw());
    let second = TrackRecord::decode(ContainerFormat::Ogg, &first.encode());
    assert_eq!(first, second);
}

#[test]
fn display_summarizes_the_record() {
    let record = TrackRecord::decode(ContainerFormat::Ogg, &full_ogg_raw());
    assert_eq!(
        record.to_string(),
        "5 - What a Wonderful World - A Wonderful World (2002) by K.D. Lang,Tony Bennett"
    );
}
