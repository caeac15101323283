use gosub_collect::{
    collect_rich, collect_string, data::InMemoryData, is_displayed, logging, max_column_width,
    text::FixedWidthMeasurer, Boundary, CollectConfig, CollectError, DisplayEnv, FragmentCode,
    ObjectId, Tag, ViewConstructor, WritingSystem,
};

const ROWS: Tag = Tag(1);
const CELLS: Tag = Tag(2);
const TEXT: Tag = Tag(3);

const TABLE: FragmentCode = FragmentCode(1);
const ROW: FragmentCode = FragmentCode(2);
const CELL: FragmentCode = FragmentCode(3);

const ENGLISH: WritingSystem = WritingSystem(1);

/// Displays a table object: a vector of rows, each a vector of cells, each
/// cell a paragraph holding one unicode property.
struct TableView;

impl ViewConstructor for TableView {
    fn display(&self, env: &mut dyn DisplayEnv, _object: ObjectId, frag: FragmentCode) -> Result<(), CollectError> {
        match frag {
            TABLE => {
                env.open_boundary(Boundary::Table)?;
                env.add_object_vec_items(ROWS, self, ROW)?;
                env.close_boundary(Boundary::Table)
            }
            ROW => {
                env.open_boundary(Boundary::TableRow)?;
                env.add_object_vec_items(CELLS, self, CELL)?;
                env.close_boundary(Boundary::TableRow)
            }
            CELL => {
                env.open_boundary(Boundary::cell())?;
                env.open_boundary(Boundary::Paragraph)?;
                env.add_unicode_prop(TEXT, ENGLISH, self)?;
                env.close_boundary(Boundary::Paragraph)?;
                env.close_boundary(Boundary::cell())
            }
            _ => Ok(()),
        }
    }
}

fn main() -> Result<(), CollectError> {
    // Configuration can be built in code or read from JSON. Here we take the
    // defaults and only change the separator used between paragraphs.
    let config = CollectConfig::builder()
        .paragraph_separator('\n')
        .build()?;

    logging::init(config.log_level);

    // Build a small 3x2 table in memory. Object ids are arbitrary, as long as
    // they are not 0 (which means "no object").
    let table = ObjectId(1);
    let mut data = InMemoryData::new();
    let rows = [["apple", "red"], ["banana", "yellow"], ["kiwi", "green"]];
    let mut row_ids = Vec::new();
    for (r, cells) in rows.iter().enumerate() {
        let row = ObjectId(10 + r as u64);
        let mut cell_ids = Vec::new();
        for (c, text) in cells.iter().enumerate() {
            let cell = ObjectId(100 + (r * 10 + c) as u64);
            data.set_unicode(cell, TEXT, *text);
            cell_ids.push(cell);
        }
        data.set_vector(row, CELLS, cell_ids);
        row_ids.push(row);
    }
    data.set_vector(table, ROWS, row_ids);

    // Each collection pass walks the same display and collects something else.
    let text = collect_string(&data, table, &TableView, TABLE)?;
    println!("text:      {text}");

    let rich = collect_rich(&data, table, &TableView, TABLE, &config)?;
    println!("rich:      {:?}", rich.text());

    let shown = is_displayed(None, &data, table, &TableView, TABLE, &config)?;
    println!("displayed: {shown}");

    // Every character is 8px wide here. With the `parley_layout` feature a
    // `ParleyMeasurer` shapes real fonts instead.
    for column in 0..2 {
        let widest = max_column_width(&data, table, &TableView, TABLE, FixedWidthMeasurer::new(8, 16), column, &config)?;
        println!("column {column}: {}px (row {:?})", widest.width, widest.row);
    }

    Ok(())
}
