#[cfg(test)]
mod flat_codec {
    use chrono::{TimeZone, Utc};
    use flat_admin::codec::{decode_many, decode_number, decode_one, encode};
    use flat_admin::{CodecError, Coordinates, Flat, FlatInput, Furnish, House, Transport, View};

    fn full_input() -> FlatInput {
        FlatInput {
            name: "Riverside <2> & co".to_string(),
            coordinates: Coordinates { x: -12.75, y: 400.0 },
            area: 48.5,
            number_of_rooms: 2,
            furnish: Some(Furnish::Designer),
            view: Some(View::Good),
            transport: Some(Transport::Normal),
            house: Some(House {
                name: Some("Aurora".to_string()),
                year: Some(1998),
                number_of_floors: 16,
                number_of_lifts: 2,
            }),
        }
    }

    #[test]
    fn round_trip_preserves_all_fields() {
        let input = full_input();
        let flat = decode_one(&encode(&input)).unwrap();

        assert_eq!(flat.to_input(), input);
        assert_eq!(flat.id, 0);
        assert_eq!(flat.creation_date, None);
    }

    #[test]
    fn round_trip_keeps_missing_house_missing() {
        let input = FlatInput {
            house: None,
            furnish: None,
            view: None,
            ..full_input()
        };
        let flat = decode_one(&encode(&input)).unwrap();

        assert_eq!(flat.house, None);
        assert_eq!(flat.furnish, None);
        assert_eq!(flat.view, None);
        assert_eq!(flat.to_input(), input);
    }

    #[test]
    fn round_trip_keeps_partial_house() {
        let input = FlatInput {
            house: Some(House {
                name: None,
                year: None,
                number_of_floors: 5,
                number_of_lifts: 0,
            }),
            ..full_input()
        };
        let flat = decode_one(&encode(&input)).unwrap();
        assert_eq!(flat.house, input.house);
    }

    #[test]
    fn whitespace_names_survive_round_trip() {
        let input = FlatInput {
            name: " spaced \n".to_string(),
            house: Some(House {
                name: Some("  ".to_string()),
                year: None,
                number_of_floors: 1,
                number_of_lifts: 0,
            }),
            ..full_input()
        };
        let flat = decode_one(&encode(&input)).unwrap();

        assert_eq!(flat.name, " spaced \n");
        assert_eq!(flat.house.and_then(|house| house.name).as_deref(), Some("  "));
    }

    #[test]
    fn name_only_document_decodes_to_defaults() {
        let flat = decode_one("<Flat><name>Test</name></Flat>").unwrap();

        assert_eq!(
            flat,
            Flat {
                name: "Test".to_string(),
                ..Flat::default()
            }
        );
        assert_eq!(flat.coordinates, Coordinates { x: 0.0, y: 0.0 });
        assert_eq!(flat.number_of_rooms, 0);
        assert!(flat.furnish.is_none());
        assert!(flat.view.is_none());
        assert!(flat.house.is_none());
    }

    #[test]
    fn decodes_server_record() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Flat>
    <id>42</id>
    <name>Corner flat</name>
    <coordinates>
        <x>3</x>
        <y>-7.5</y>
    </coordinates>
    <creationDate>2024-10-18T23:31:23Z</creationDate>
    <area>71.2</area>
    <numberOfRooms>3</numberOfRooms>
    <furnish>LITTLE</furnish>
    <view>YARD</view>
    <transport>FEW</transport>
    <house>
        <name>Old mill</name>
        <year>1911</year>
        <numberOfFloors>4</numberOfFloors>
        <numberOfLifts>0</numberOfLifts>
    </house>
</Flat>"#;

        let flat = decode_one(xml).unwrap();
        assert_eq!(flat.id, 42);
        assert_eq!(flat.name, "Corner flat");
        assert_eq!(flat.coordinates, Coordinates { x: 3.0, y: -7.5 });
        assert_eq!(
            flat.creation_date,
            Some(Utc.with_ymd_and_hms(2024, 10, 18, 23, 31, 23).unwrap())
        );
        assert_eq!(flat.area, 71.2);
        assert_eq!(flat.furnish, Some(Furnish::Little));
        assert_eq!(flat.view, Some(View::Yard));
        assert_eq!(flat.transport, Some(Transport::Few));
        let house = flat.house.unwrap();
        assert_eq!(house.name.as_deref(), Some("Old mill"));
        assert_eq!(house.year, Some(1911));
        assert_eq!(house.number_of_floors, 4);
    }

    #[test]
    fn finds_flat_nested_in_another_root() {
        let flat = decode_one("<response><Flat><id>9</id></Flat></response>").unwrap();
        assert_eq!(flat.id, 9);
    }

    #[test]
    fn unparseable_date_is_sentinel() {
        let flat = decode_one("<Flat><creationDate>someday</creationDate></Flat>").unwrap();
        assert_eq!(flat.creation_date, None);
    }

    #[test]
    fn wrapped_list_keeps_document_order() {
        let xml = "<Flats><Flat><id>2</id><name>b</name></Flat><Flat><id>1</id><name>a</name></Flat></Flats>";
        let flats = decode_many(xml).unwrap();

        assert_eq!(flats.len(), 2);
        assert_eq!(flats[0].id, 2);
        assert_eq!(flats[1].name, "a");
    }

    #[test]
    fn bare_record_is_a_single_element_list() {
        let flats = decode_many("<Flat><id>5</id></Flat>").unwrap();
        assert_eq!(flats.len(), 1);
        assert_eq!(flats[0].id, 5);
    }

    #[test]
    fn unwrapped_list_is_accepted() {
        let flats = decode_many("<Flat><id>1</id></Flat>\n<Flat><id>2</id></Flat>").unwrap();
        let ids: Vec<i64> = flats.iter().map(|flat| flat.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn empty_collections() {
        assert!(decode_many("<Flats></Flats>").unwrap().is_empty());
        assert!(decode_many("<Flats/>").unwrap().is_empty());
        assert!(decode_many("").unwrap().is_empty());
    }

    #[test]
    fn non_xml_is_malformed() {
        assert!(matches!(
            decode_one("not xml"),
            Err(CodecError::MalformedDocument(_))
        ));
        assert!(matches!(
            decode_many("not xml"),
            Err(CodecError::MalformedDocument(_))
        ));
    }

    #[test]
    fn aggregate_number() {
        assert_eq!(decode_number("<number>1500000.5</number>").unwrap(), Some(1500000.5));
        assert_eq!(decode_number("<number>many</number>").unwrap(), None);
    }
}
