mod tests {
    use mbia045_matrix::encoder::{encode_frame, pack_bit_planes};
    use mbia045_matrix::layout::one_2_sf::{COLS, LAYOUT, LED_COUNT, ROWS};
    use mbia045_matrix::layout::validate;
    use mbia045_matrix::{
        DataLine, Error, FrameBuffer, GammaTable, LedPosition, Rgb, RowBuffer, RowSet,
    };

    fn test_color(index: usize) -> Rgb {
        Rgb {
            r: (index * 3) as u8,
            g: 255 - index as u8,
            b: ((index * 37) % 256) as u8,
        }
    }

    fn encoded(frame: &FrameBuffer<LED_COUNT>) -> RowSet<ROWS, COLS> {
        let mut rows = [RowBuffer::new(); ROWS];
        encode_frame(frame.colors(), &LAYOUT, &GammaTable::CIE1931, &mut rows);
        rows
    }

    #[test]
    fn test_pack_bit_planes() {
        let planes = pack_bit_planes(0x8000, 0x0001, 0xFFFF);
        assert_eq!(planes[0], (1 << 14) | (1 << 12));
        for plane in &planes[1..15] {
            assert_eq!(*plane, 1 << 12);
        }
        assert_eq!(planes[15], (1 << 13) | (1 << 12));

        assert_eq!(pack_bit_planes(0, 0, 0), [0; 16]);
    }

    #[test]
    fn test_one_2_sf_layout() {
        assert_eq!(LAYOUT.len(), 69);
        assert_eq!(validate::<ROWS, COLS>(&LAYOUT), Ok(()));
        for (index, position) in LAYOUT.iter().enumerate() {
            let duplicates = LAYOUT.iter().filter(|other| *other == position).count();
            assert_eq!(duplicates, 1, "LED {} shares its channel", index);
        }
    }

    #[test]
    fn test_validate_rejects_outside_grid() {
        let layout = [LedPosition::new(0, 0), LedPosition::new(1, 4)];
        assert_eq!(
            validate::<2, 4>(&layout),
            Err(Error::PositionOutOfRange {
                index: 1,
                position: LedPosition::new(1, 4),
            })
        );
        assert_eq!(validate::<2, 5>(&layout), Ok(()));
    }

    #[test]
    fn test_encode_round_trip() {
        let gamma = GammaTable::CIE1931;
        let mut frame = FrameBuffer::<LED_COUNT>::new();
        for index in 0..LED_COUNT {
            frame.set(index, test_color(index)).unwrap();
        }
        let rows = encoded(&frame);

        for (index, position) in LAYOUT.iter().enumerate() {
            let color = test_color(index);
            let row = &rows[usize::from(position.row)];
            let col = usize::from(position.col);

            assert_eq!(row.grayscale(col, DataLine::Red), Some(gamma.lookup(color.r)));
            assert_eq!(row.grayscale(col, DataLine::Green), Some(gamma.lookup(color.g)));
            assert_eq!(row.grayscale(col, DataLine::Blue), Some(gamma.lookup(color.b)));

            for plane in 0..16 {
                let word = row.slot(col, plane).unwrap();
                let bit = |value: u16| (value >> (15 - plane)) & 1;
                assert_eq!((word >> 14) & 1, bit(gamma.lookup(color.r)));
                assert_eq!((word >> 13) & 1, bit(gamma.lookup(color.g)));
                assert_eq!((word >> 12) & 1, bit(gamma.lookup(color.b)));
                assert_eq!(word & !0b0111_0000_0000_0000, 0);
            }
        }
    }

    #[test]
    fn test_unmapped_channels_stay_dark() {
        let mut frame = FrameBuffer::<LED_COUNT>::new();
        frame.fill(Rgb {
            r: 255,
            g: 255,
            b: 255,
        });
        let rows = encoded(&frame);

        for (row, col) in [(2, 12), (3, 1), (3, 14), (4, 4), (4, 6), (4, 8)] {
            assert_eq!(rows[row].channel(col), Some(&[0; 16]), "({}, {})", row, col);
        }
        for row in &rows {
            assert_eq!(row.channel(15), Some(&[0; 16]));
        }
        assert_eq!(rows[0].grayscale(0, DataLine::Red), Some(16383));
    }

    #[test]
    fn test_row_isolation() {
        let mut frame = FrameBuffer::<LED_COUNT>::new();
        for index in 0..LED_COUNT {
            frame.set(index, test_color(index)).unwrap();
        }
        let before = encoded(&frame);

        // First LED of row 2
        let index = LAYOUT
            .iter()
            .position(|position| position.row == 2)
            .unwrap();
        frame.set(index, Rgb { r: 1, g: 2, b: 3 }).unwrap();
        let after = encoded(&frame);

        for row in 0..ROWS {
            if row == 2 {
                assert_ne!(before[row], after[row]);
            } else {
                assert_eq!(before[row], after[row], "row {}", row);
            }
        }
    }

    #[test]
    fn test_encode_overwrites_previous_frame() {
        let mut frame = FrameBuffer::<LED_COUNT>::new();
        frame.fill(Rgb {
            r: 200,
            g: 100,
            b: 50,
        });
        let mut rows = encoded(&frame);

        frame.fill(Rgb { r: 0, g: 0, b: 0 });
        encode_frame(frame.colors(), &LAYOUT, &GammaTable::CIE1931, &mut rows);
        assert!(rows.iter().all(|row| row.words().iter().all(|&word| word == 0)));
    }

    #[test]
    fn test_frame_buffer() {
        let mut frame = FrameBuffer::<4>::new();
        assert_eq!(frame.len(), 4);
        assert!(!frame.is_empty());
        assert_eq!(frame.get(0), Some(Rgb { r: 0, g: 0, b: 0 }));

        frame.set(3, Rgb { r: 1, g: 2, b: 3 }).unwrap();
        assert_eq!(frame.get(3), Some(Rgb { r: 1, g: 2, b: 3 }));

        assert_eq!(
            frame.set(4, Rgb { r: 9, g: 9, b: 9 }),
            Err(Error::IndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(frame.get(4), None);
    }

    #[test]
    fn test_row_buffer_accessors() {
        let row = RowBuffer::<3>::new();
        assert_eq!(row.words().len(), 48);
        assert_eq!(row.slot(3, 0), None);
        assert_eq!(row.slot(0, 16), None);
        assert_eq!(row.grayscale(3, DataLine::Red), None);
    }
}
