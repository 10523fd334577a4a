// Example: data-source driven pages with content-sized tabs and dividers.
use std::sync::Arc;

use scrolling_tabs::{
    DividerStyle, PageDataSource, ScrollSyncController, Size, TabCell, TabControllerOptions,
    TabSizing,
};

struct Feeds {
    names: Vec<&'static str>,
}

impl PageDataSource<String> for Feeds {
    fn page_count(&self) -> Option<usize> {
        Some(self.names.len())
    }

    fn content(&self, index: usize) -> Option<String> {
        self.names.get(index).map(|n| format!("feed://{n}"))
    }

    fn configure_cell(&self, index: usize, cell: &TabCell) -> Option<TabCell> {
        let name = self.names.get(index)?;
        let mut cell = cell.clone();
        cell.title = name.to_uppercase();
        Some(cell)
    }
}

fn main() {
    let options = TabControllerOptions::new()
        .with_tab_sizing(TabSizing::SizeToContent)
        .with_center_select_tabs(true)
        .with_divider(DividerStyle {
            visible: true,
            ..DividerStyle::default()
        });
    let mut c: ScrollSyncController<String> = ScrollSyncController::new(options);
    c.on_container_resized(Size::new(360.0, 640.0));
    c.set_data_source(Some(Arc::new(Feeds {
        names: vec!["top", "rust", "programming", "games", "music", "science"],
    })));
    c.view_did_appear();

    for cell in c.strip().cells() {
        println!("{:>12} x={:>6.1} w={:>6.1}", cell.title, cell.frame.x, cell.frame.width);
    }
    println!("dividers={}", c.strip().divider_frames().count());

    c.select_page(4, false);
    println!(
        "current={} strip_offset={:.1} inset={:?} content={:?}",
        c.current_page(),
        c.strip().content_offset(),
        c.strip().content_inset(),
        c.host().content(c.current_page())
    );
}
