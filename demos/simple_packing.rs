//! 簡單包裝計算示例

use packcalc::{
    CalculatePackSizesRequest, CreatePackSizeRequest, InMemoryPackSizeRepository,
    PackSizeService,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== 簡單包裝計算示例 ===\n");

    let service = PackSizeService::new(InMemoryPackSizeRepository::new());

    // 建立產品 1 的包裝規格
    for size in [250, 500, 1000, 2000, 5000] {
        service.create(&CreatePackSizeRequest {
            product_id: 1,
            size,
        })?;
    }

    println!("包裝規格:");
    for pack in service.get_all()? {
        println!("  - 產品: {}, 規格: {}, 啟用: {}", pack.product_id, pack.size, pack.active);
    }

    for order_quantity in [1, 250, 251, 501, 12001] {
        let response = service.calc_optimal_packs(
            &CalculatePackSizesRequest {
                product_id: 1,
                order_quantity,
            },
            None,
        )?;

        println!("\n訂單數量 {}:", order_quantity);
        for detail in &response.pack_combination {
            println!("  - {} x {}", detail.count, detail.size);
        }
        println!(
            "  總件數: {}, 總包數: {}",
            response.total_items, response.total_packs
        );
    }

    println!("\nJSON 輸出:");
    let response = service.calc_optimal_packs(
        &CalculatePackSizesRequest {
            product_id: 1,
            order_quantity: 12001,
        },
        None,
    )?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
